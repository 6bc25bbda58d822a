//! Events emitted by the vendor session and the sinks they feed.

use crate::status::SessionStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the session's conversation history, as carried by a
/// handoff event. Only the fields the adapter inspects are typed; the
/// rest rides along in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryItem {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Value,
}

impl HistoryItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Value::Object(Default::default()),
        }
    }
}

/// Events the vendor session delivers to the adapter, in emission order.
#[derive(Debug, Clone)]
pub enum VendorEvent {
    /// Transport or protocol error reported by the session.
    Error(Value),
    /// Conversational control transferred between named agents. The
    /// destination is encoded in the last history entry's identifier.
    AgentHandoff { history: Vec<HistoryItem> },
    /// A tool call started.
    ToolStart(Value),
    /// A tool call finished.
    ToolEnd(Value),
    /// The session replaced the full conversation history.
    HistoryUpdated(Vec<Value>),
    /// The session appended one history entry.
    HistoryAdded(Value),
    /// An output guardrail flagged a violation.
    GuardrailTripped(Value),
    /// A raw transport event the session object did not handle itself.
    /// The payload carries a `type` field naming the event.
    Transport(Value),
}

/// Sinks for everything the adapter forwards: transcript handlers, the
/// debug event log, and connection callbacks.
///
/// Each inbound vendor event is forwarded exactly once, in arrival
/// order. Implementations are expected to be cheap and non-blocking;
/// they run on the adapter's event pump task.
pub trait SessionObserver: Send + Sync {
    /// Status transitions, fired once per transition.
    fn on_connection_change(&self, status: SessionStatus);

    /// Control moved to the named destination agent.
    fn on_agent_handoff(&self, agent_name: &str);

    fn on_tool_start(&self, event: &Value);
    fn on_tool_end(&self, event: &Value);

    fn on_history_updated(&self, history: &[Value]);
    fn on_history_added(&self, item: &Value);

    fn on_guardrail_tripped(&self, event: &Value);

    /// Incremental agent speech transcript update.
    fn on_transcription_delta(&self, event: &Value);
    /// A transcript (user input or agent response) finished.
    fn on_transcription_completed(&self, event: &Value);

    /// Outbound activity log (status changes, sent messages).
    fn log_client_event(&self, event: &Value, name: &str);
    /// Raw server events with no dedicated handler, plus session errors.
    fn log_server_event(&self, event: &Value);
}

/// The transport event types routed to transcription handlers rather
/// than the generic server log.
pub(crate) const INPUT_TRANSCRIPTION_COMPLETED: &str =
    "conversation.item.input_audio_transcription.completed";
pub(crate) const RESPONSE_TRANSCRIPT_DONE: &str = "response.audio_transcript.done";
pub(crate) const RESPONSE_TRANSCRIPT_DELTA: &str = "response.audio_transcript.delta";

/// Marker prefix on history identifiers that encode an agent handoff.
pub(crate) const TRANSFER_PREFIX: &str = "transfer_to_";

/// Extracts the destination agent name from a handoff history.
///
/// Returns `None` when the history is empty or the last entry's
/// identifier does not carry the transfer marker; the caller logs and
/// skips the callback in that case rather than failing the session.
pub(crate) fn handoff_destination(history: &[HistoryItem]) -> Option<&str> {
    history.last()?.name.strip_prefix(TRANSFER_PREFIX)
}
