//! Capability traits for the vendor realtime SDK.
//!
//! The adapter never talks to a concrete SDK type. Everything it needs
//! from the vendor — session lifecycle, transport event send, media
//! device access — is behind these traits, so tests substitute fakes
//! and production code binds whichever SDK the application embeds.

use crate::agent::{AgentDefinition, OutputGuardrail};
use crate::codec::{AudioFormat, Codec};
use crate::error::MicError;
use crate::events::VendorEvent;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// Model identifier bound to every session.
pub const REALTIME_MODEL: &str = "gpt-realtime";

/// Transcription model enabled for live input transcription.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Everything needed to construct one vendor session.
pub struct SessionSettings {
    /// The root agent the session is bound to.
    pub agent: AgentDefinition,
    pub model: String,
    /// Sample format applied to both input and output audio.
    pub input_audio_format: AudioFormat,
    pub output_audio_format: AudioFormat,
    /// Live input transcription model, always enabled.
    pub transcription_model: String,
    /// Codec the transport must prefer when reordering SDP codec
    /// preferences before the offer/answer exchange.
    pub preferred_codec: Codec,
    /// Identifier of the audio output target, when the caller supplied one.
    pub audio_output: Option<String>,
    /// Output guardrails, forwarded verbatim. Defaults to none.
    pub output_guardrails: Vec<OutputGuardrail>,
    /// Opaque caller-supplied context, forwarded verbatim.
    pub extra_context: Map<String, Value>,
}

/// An active vendor session and its transport.
///
/// Mirrors the published surface of the vendor SDK's session object:
/// connect, close, interrupt, send-message, mute, and a raw transport
/// event send.
#[async_trait]
pub trait VendorSession: Send + Sync {
    /// Opens the transport using the ephemeral credential.
    async fn connect(&self, api_key: &str) -> Result<()>;

    /// Closes the session. Errors are not actionable by callers.
    async fn close(&self);

    /// Stops any in-progress agent response immediately (barge-in).
    async fn interrupt(&self);

    /// Forwards a user text message into the conversation.
    async fn send_message(&self, text: &str) -> Result<()>;

    /// Sets the local audio-send mute state.
    async fn mute(&self, muted: bool);

    /// Sends an opaque event to the transport layer verbatim.
    async fn send_raw(&self, event: Value) -> Result<()>;
}

/// Constructs vendor sessions.
///
/// The returned receiver is the single-consumer queue the session
/// delivers its events on; draining it from one task preserves the
/// transport's emission order.
pub trait SessionFactory: Send + Sync {
    fn create(
        &self,
        settings: SessionSettings,
    ) -> Result<(Box<dyn VendorSession>, mpsc::Receiver<VendorEvent>)>;
}

/// Constraints for the microphone permission probe.
#[derive(Debug, Clone, Copy)]
pub struct AudioConstraints {
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
    pub auto_gain_control: bool,
}

impl AudioConstraints {
    /// The constraint set used when eliciting the permission grant.
    pub fn voice() -> Self {
        Self {
            echo_cancellation: true,
            noise_suppression: true,
            auto_gain_control: true,
        }
    }
}

/// A granted media stream. The adapter only ever stops it: the probe
/// stream exists to confirm the permission grant, not to capture audio.
pub trait MediaStream: Send {
    fn stop_all_tracks(&mut self);
}

/// Host environment capabilities: peer-connection support and media
/// device access.
#[async_trait]
pub trait MediaEnvironment: Send + Sync {
    /// Whether the runtime exposes realtime peer-connection capability.
    fn supports_realtime(&self) -> bool;

    /// Requests microphone access. Suspends on the permission prompt.
    async fn request_microphone(
        &self,
        constraints: AudioConstraints,
    ) -> Result<Box<dyn MediaStream>, MicError>;
}
