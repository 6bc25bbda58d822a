//! Voicelink API Library Crate
//!
//! This library contains the logic for the Voicelink credential
//! service: minting short-lived realtime session credentials, the
//! text-only fallback relay, and the routing that exposes both. The
//! `bin/api.rs` binary is a thin wrapper around this library.

pub mod agents;
pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
