//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the credential
//! service, including the OpenAPI documentation endpoint.

use crate::{
    handlers,
    models::{AudioTranscription, ErrorResponse, McpTool, RealtimeSessionRequest, TurnDetection},
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_session,
        handlers::create_mcp_session,
        handlers::create_text_response,
    ),
    components(
        schemas(RealtimeSessionRequest, TurnDetection, AudioTranscription, McpTool, ErrorResponse)
    ),
    tags(
        (name = "Voicelink API", description = "Ephemeral credential minting for realtime voice sessions")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/api/session", get(handlers::create_session))
        .route("/api/session-mcp", get(handlers::create_mcp_session))
        .route("/api/responses", post(handlers::create_text_response))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
