//! Fishing tip handler.

use axum::{extract::State, Json};
use serde::Serialize;

use catchguide::random_tip;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the tip endpoint.
#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: String,
}

/// GET /api/tip - Get a random fishing tip.
pub async fn get_tip(State(state): State<AppState>) -> Result<Json<TipResponse>, ApiError> {
    let tip = random_tip(&state.tips_path)?;
    Ok(Json(TipResponse { tip }))
}
