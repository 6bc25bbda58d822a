//! Voicelink Realtime Library
//!
//! This crate contains the client-side core for a realtime voice
//! conversation: the session adapter that owns one vendor session's
//! lifecycle, the codec preference mapping, agent definitions, the
//! ephemeral-credential provider, and the capability traits behind
//! which the vendor SDK (session, transport, media devices) lives.
//!
//! The vendor session itself is an external dependency. It is reached
//! only through the traits in [`vendor`], so tests substitute fakes
//! instead of reconstructing the SDK.

pub mod adapter;
pub mod agent;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod events;
pub mod log;
pub mod status;
pub mod vendor;

pub use adapter::{ConnectOptions, SessionAdapter};
pub use error::{AdapterError, MicError};
pub use status::SessionStatus;
