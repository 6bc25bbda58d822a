//! Error types for the session adapter.
//!
//! Every failure during `connect` rolls the adapter's status back to
//! `DISCONNECTED` before the error is returned; there is no automatic
//! retry and no partial session state is left behind.

/// Cause of a microphone acquisition failure.
///
/// The display strings are user-facing and actionable: the UI shows
/// them directly instead of raw system error text.
#[derive(Debug, thiserror::Error)]
pub enum MicError {
    #[error(
        "Microphone access denied. Allow microphone access in your browser settings and try again."
    )]
    AccessDenied,
    #[error("No microphone found. Connect a microphone and try again.")]
    NoDevice,
    #[error("Microphone capture is not supported in this environment.")]
    Unsupported,
    #[error("Microphone error: {0}")]
    Other(String),
}

/// Failures surfaced by [`crate::SessionAdapter`] operations.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The runtime environment lacks realtime peer-connection support.
    #[error("Realtime peer connections are not supported in this environment.")]
    Capability,

    /// Microphone access failed; the cause specializes the message.
    #[error(transparent)]
    Permission(#[from] MicError),

    /// Fetching or parsing the ephemeral credential failed.
    #[error("Failed to obtain a session credential: {0}")]
    Credential(#[source] anyhow::Error),

    /// Constructing or opening the vendor session failed. The
    /// underlying cause is propagated unchanged.
    #[error("Realtime transport failure: {0}")]
    Transport(#[source] anyhow::Error),

    /// An operation requiring an active session was invoked without one.
    #[error("Realtime session not connected.")]
    NotConnected,
}
