//! Provider status handler.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;

/// Response for LLM status check.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether identification is available.
    pub available: bool,

    /// Name of the configured provider (if any).
    pub provider: Option<String>,

    /// Message for the user.
    pub message: String,
}

/// GET /api/status - Check if a provider is configured.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    match state.provider_name() {
        Some(name) => Json(StatusResponse {
            available: true,
            message: format!("Provider '{}' is configured and ready.", name),
            provider: Some(name),
        }),
        None => Json(StatusResponse {
            available: false,
            provider: None,
            message: state
                .config_error
                .clone()
                .unwrap_or_else(|| catchguide::error::MISSING_KEY_MESSAGE.to_string()),
        }),
    }
}
