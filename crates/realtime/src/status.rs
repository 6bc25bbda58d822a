use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection state of one realtime session adapter.
///
/// Exactly one instance exists per adapter. It is mutated only by the
/// adapter's internal transition helper and read by UI code through
/// [`crate::SessionAdapter::watch_status`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Disconnected => write!(f, "DISCONNECTED"),
            SessionStatus::Connecting => write!(f, "CONNECTING"),
            SessionStatus::Connected => write!(f, "CONNECTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Disconnected).unwrap(),
            "\"DISCONNECTED\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Connecting).unwrap(),
            "\"CONNECTING\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Connected).unwrap(),
            "\"CONNECTED\""
        );
    }

    #[test]
    fn test_status_deserialization() {
        let status: SessionStatus = serde_json::from_str("\"CONNECTED\"").unwrap();
        assert_eq!(status, SessionStatus::Connected);

        let invalid: Result<SessionStatus, _> = serde_json::from_str("\"connected\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in [
            SessionStatus::Disconnected,
            SessionStatus::Connecting,
            SessionStatus::Connected,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
