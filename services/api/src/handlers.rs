//! Axum Handlers for the Credential Service
//!
//! Two GET routes mint short-lived realtime session credentials by
//! relaying a tuned session body to the upstream REST API, and one
//! POST route relays single-turn text requests for the text-only
//! fallback UI. Handlers use `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use tracing::error;

use crate::{agents, models::ErrorResponse, state::AppState};

/// Handler failure. Every fallible step here is an upstream relay, so
/// there is a single mapping: log the cause, answer 500 with a generic
/// body. A missing API key is not representable at request time; the
/// service refuses to start without one.
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Internal Server Error: {:?}", self.0);
        let error = "Internal Server Error".to_string();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error }),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Relays a mint request upstream and returns the session body —
/// including the nested `client_secret.value` the browser uses as its
/// ephemeral key. Upstream error bodies are passed through so the
/// client sees the real message.
async fn mint_upstream(
    state: &AppState,
    request: &crate::models::RealtimeSessionRequest,
) -> Result<Json<Value>, ApiError> {
    let response = state
        .http
        .post(format!("{}/realtime/sessions", state.upstream_base))
        .bearer_auth(&state.config.openai_api_key)
        .json(request)
        .send()
        .await?;

    let body: Value = response.json().await?;
    Ok(Json(body))
}

/// Mint an ephemeral credential for a standard realtime voice session.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Minted session, including client_secret.value"),
        (status = 500, description = "Upstream mint failed", body = ErrorResponse)
    )
)]
pub async fn create_session(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let request = agents::realtime_session_request(&state.config);
    mint_upstream(&state, &request).await
}

/// Mint an ephemeral credential for a session with the external
/// time-service tool registered (auto-approved).
#[utoipa::path(
    get,
    path = "/api/session-mcp",
    responses(
        (status = 200, description = "Minted session with one MCP tool attached"),
        (status = 500, description = "Upstream mint failed", body = ErrorResponse)
    )
)]
pub async fn create_mcp_session(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let request = agents::mcp_session_request(&state.config);
    mint_upstream(&state, &request).await
}

/// Relay a single-turn text request for the text-only fallback mode.
/// The body is forwarded verbatim; no realtime session is involved.
#[utoipa::path(
    post,
    path = "/api/responses",
    responses(
        (status = 200, description = "Upstream response body"),
        (status = 500, description = "Upstream call failed", body = ErrorResponse)
    )
)]
pub async fn create_text_response(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let response = state
        .http
        .post(format!("{}/responses", state.upstream_base))
        .bearer_auth(&state.config.openai_api_key)
        .json(&payload)
        .send()
        .await?;

    let body: Value = response.json().await?;
    Ok(Json(body))
}
