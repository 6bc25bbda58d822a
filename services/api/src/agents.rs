//! Session presets for the two mint flavors.
//!
//! The agent definitions live in `voicelink-realtime`; this module
//! binds them to the upstream mint payload (model, voice, VAD tuning)
//! for each credential route.

use crate::config::Config;
use crate::models::{AudioTranscription, McpTool, RealtimeSessionRequest, TurnDetection};
use voicelink_realtime::agent::AgentDefinition;

fn base_request(config: &Config, agent: AgentDefinition) -> RealtimeSessionRequest {
    RealtimeSessionRequest {
        model: config.realtime_model.clone(),
        instructions: agent.instructions,
        voice: agent.voice,
        temperature: 0.8,
        max_response_output_tokens: 4096,
        turn_detection: TurnDetection::server_vad(),
        input_audio_transcription: AudioTranscription::whisper(),
        tools: vec![],
    }
}

/// Mint payload for the standard voice session.
pub fn realtime_session_request(config: &Config) -> RealtimeSessionRequest {
    base_request(config, AgentDefinition::custom_realtime())
}

/// Mint payload for the MCP test session: same tuning, plus one
/// external time-service tool registered with auto-approval.
pub fn mcp_session_request(config: &Config) -> RealtimeSessionRequest {
    let mut request = base_request(config, AgentDefinition::mcp_test());
    request.tools = vec![McpTool::time_server(&config.mcp_time_server_url)];
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tracing::Level;

    fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:3000".parse::<SocketAddr>().unwrap(),
            openai_api_key: "test-key".into(),
            realtime_model: "gpt-realtime".into(),
            mcp_time_server_url: "https://time.internal.example".into(),
            log_level: Level::INFO,
        }
    }

    #[test]
    fn test_standard_session_has_no_tools() {
        let request = realtime_session_request(&test_config());
        assert_eq!(request.model, "gpt-realtime");
        assert_eq!(request.voice, "alloy");
        assert!(request.tools.is_empty());
        assert!(request.instructions.contains("realtime voice AI"));
    }

    #[test]
    fn test_mcp_session_registers_time_tool() {
        let request = mcp_session_request(&test_config());
        assert_eq!(request.tools.len(), 1);
        assert_eq!(request.tools[0].server_label, "time");
        assert_eq!(request.tools[0].server_url, "https://time.internal.example");
        assert_eq!(request.tools[0].require_approval, "never");
        assert!(request.instructions.contains("MCP"));
    }

    #[test]
    fn test_both_flavors_share_vad_tuning() {
        let standard = realtime_session_request(&test_config());
        let mcp = mcp_session_request(&test_config());
        assert_eq!(standard.turn_detection, mcp.turn_detection);
        assert_eq!(
            standard.input_audio_transcription,
            mcp.input_audio_transcription
        );
    }
}
