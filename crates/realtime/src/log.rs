//! Debug event log.
//!
//! An explicit context object owned by whatever owns the adapter (a UI
//! view, a test harness), not module-global state. The UI renders the
//! snapshot; `tracing` carries the same entries for operators.

use crate::events::SessionObserver;
use crate::status::SessionStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Direction of a logged event relative to this client.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Client,
    Server,
}

/// One logged event.
#[derive(Serialize, Debug, Clone)]
pub struct LogEntry {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub direction: Direction,
    pub name: String,
    pub payload: Value,
}

/// Append-only log of client and server events for one session.
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, direction: Direction, name: impl Into<String>, payload: Value) {
        let entry = LogEntry {
            id: Uuid::new_v4(),
            at: Utc::now(),
            direction,
            name: name.into(),
            payload,
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Current contents, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`SessionObserver`] that records everything into an [`EventLog`]
/// and mirrors it to `tracing`. Suitable as a default sink when the
/// application has no dedicated transcript UI.
pub struct LoggingObserver {
    log: Arc<EventLog>,
}

impl LoggingObserver {
    pub fn new(log: Arc<EventLog>) -> Self {
        Self { log }
    }
}

impl SessionObserver for LoggingObserver {
    fn on_connection_change(&self, status: SessionStatus) {
        tracing::info!(%status, "connection status changed");
        self.log
            .push(Direction::Client, status.to_string(), json!({}));
    }

    fn on_agent_handoff(&self, agent_name: &str) {
        tracing::info!(agent = agent_name, "agent handoff");
        self.log.push(
            Direction::Server,
            "agent_handoff",
            json!({ "agent": agent_name }),
        );
    }

    fn on_tool_start(&self, event: &Value) {
        self.log
            .push(Direction::Server, "agent_tool_start", event.clone());
    }

    fn on_tool_end(&self, event: &Value) {
        self.log
            .push(Direction::Server, "agent_tool_end", event.clone());
    }

    fn on_history_updated(&self, history: &[Value]) {
        self.log.push(
            Direction::Server,
            "history_updated",
            json!({ "length": history.len() }),
        );
    }

    fn on_history_added(&self, item: &Value) {
        self.log
            .push(Direction::Server, "history_added", item.clone());
    }

    fn on_guardrail_tripped(&self, event: &Value) {
        tracing::warn!(?event, "guardrail tripped");
        self.log
            .push(Direction::Server, "guardrail_tripped", event.clone());
    }

    fn on_transcription_delta(&self, event: &Value) {
        self.log
            .push(Direction::Server, "transcription_delta", event.clone());
    }

    fn on_transcription_completed(&self, event: &Value) {
        self.log
            .push(Direction::Server, "transcription_completed", event.clone());
    }

    fn log_client_event(&self, event: &Value, name: &str) {
        tracing::debug!(name, "client event");
        self.log.push(Direction::Client, name, event.clone());
    }

    fn log_server_event(&self, event: &Value) {
        let name = event
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        tracing::debug!(name, "server event");
        self.log.push(Direction::Server, name, event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_insertion_order() {
        let log = EventLog::new();
        log.push(Direction::Client, "first", json!({}));
        log.push(Direction::Server, "second", json!({}));
        log.push(Direction::Server, "third", json!({}));

        let names: Vec<_> = log.snapshot().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_logging_observer_names_server_events_by_type() {
        let log = Arc::new(EventLog::new());
        let observer = LoggingObserver::new(log.clone());

        observer.log_server_event(&json!({ "type": "session.created" }));
        observer.log_server_event(&json!({ "delta": "hi" }));

        let snapshot = log.snapshot();
        assert_eq!(snapshot[0].name, "session.created");
        assert_eq!(snapshot[1].name, "unknown");
    }

    #[test]
    fn test_status_changes_are_logged_as_client_events() {
        let log = Arc::new(EventLog::new());
        let observer = LoggingObserver::new(log.clone());

        observer.on_connection_change(SessionStatus::Connecting);
        observer.on_connection_change(SessionStatus::Connected);

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, "CONNECTING");
        assert_eq!(snapshot[0].direction, Direction::Client);
        assert_eq!(snapshot[1].name, "CONNECTED");
    }
}
