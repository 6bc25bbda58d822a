//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the upstream HTTP client and configuration.

use crate::config::Config;
use std::sync::Arc;

/// Base URL of the upstream OpenAI REST API. Overridable so tests can
/// point the handlers at a local stub.
pub const DEFAULT_UPSTREAM_BASE: &str = "https://api.openai.com/v1";

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub upstream_base: String,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
        }
    }

    /// Points the handlers at a different upstream, e.g. a local stub.
    pub fn with_upstream_base(mut self, base: impl Into<String>) -> Self {
        self.upstream_base = base.into();
        self
    }
}
