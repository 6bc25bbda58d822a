//! API Models
//!
//! This module defines the wire payloads for minting realtime session
//! credentials upstream, plus the error shape returned to clients. The
//! structs double as OpenAPI schemas via `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Server-side voice-activity turn detection parameters.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TurnDetection {
    #[serde(rename = "type")]
    pub kind: String,
    pub threshold: f32,
    pub prefix_padding_ms: u32,
    pub silence_duration_ms: u32,
}

impl TurnDetection {
    /// The tuned server-VAD settings used for every minted session.
    pub fn server_vad() -> Self {
        Self {
            kind: "server_vad".to_string(),
            threshold: 0.5,
            prefix_padding_ms: 300,
            silence_duration_ms: 500,
        }
    }
}

/// Live input transcription settings.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AudioTranscription {
    pub model: String,
}

impl AudioTranscription {
    pub fn whisper() -> Self {
        Self {
            model: "whisper-1".to_string(),
        }
    }
}

/// An external MCP tool server registered with the remote session.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct McpTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub server_label: String,
    pub server_url: String,
    pub require_approval: String,
}

impl McpTool {
    /// The demo time-service tool, registered with auto-approval.
    pub fn time_server(url: &str) -> Self {
        Self {
            kind: "mcp".to_string(),
            server_label: "time".to_string(),
            server_url: url.to_string(),
            require_approval: "never".to_string(),
        }
    }
}

/// Body posted upstream to mint one ephemeral session credential.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct RealtimeSessionRequest {
    pub model: String,
    pub instructions: String,
    pub voice: String,
    pub temperature: f32,
    pub max_response_output_tokens: u32,
    pub turn_detection: TurnDetection,
    pub input_audio_transcription: AudioTranscription,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpTool>,
}

/// Error body returned to clients. The `error` field name matches what
/// the browser-side credential provider surfaces to the user.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_detection_wire_shape() {
        let vad = TurnDetection::server_vad();
        let json = serde_json::to_value(&vad).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "server_vad",
                "threshold": 0.5,
                "prefix_padding_ms": 300,
                "silence_duration_ms": 500
            })
        );
    }

    #[test]
    fn test_mcp_tool_wire_shape() {
        let tool = McpTool::time_server("https://time.internal.example");
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "mcp");
        assert_eq!(json["server_label"], "time");
        assert_eq!(json["server_url"], "https://time.internal.example");
        assert_eq!(json["require_approval"], "never");
    }

    #[test]
    fn test_session_request_omits_empty_tools() {
        let request = RealtimeSessionRequest {
            model: "gpt-realtime".into(),
            instructions: "Be brief.".into(),
            voice: "alloy".into(),
            temperature: 0.8,
            max_response_output_tokens: 4096,
            turn_detection: TurnDetection::server_vad(),
            input_audio_transcription: AudioTranscription::whisper(),
            tools: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tools").is_none());
        assert_eq!(json["input_audio_transcription"]["model"], "whisper-1");
    }

    #[test]
    fn test_error_response_field_name() {
        let error = ErrorResponse {
            error: "OPENAI_API_KEY not configured".into(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"error":"OPENAI_API_KEY not configured"}"#);
    }
}
