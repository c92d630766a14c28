//! Catch identification handler.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use catchguide::{CapturedImage, Coordinate, Outcome, Submission};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request posted by the capture page.
#[derive(Debug, Default, Deserialize)]
pub struct IdentifyRequest {
    /// Photo as base64 or a `data:` URL.
    #[serde(default)]
    pub image_base64: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Status of an identification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifyStatus {
    Skipped,
    Completed,
    Failed,
}

/// Response for the identify endpoint.
#[derive(Debug, Serialize)]
pub struct IdentifyResponse {
    pub status: IdentifyStatus,

    /// "Latitude .., Longitude .." when a fix was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_notice: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IdentifyResponse {
    fn new(status: IdentifyStatus, location: Option<String>) -> Self {
        Self {
            status,
            location,
            identification: None,
            species: None,
            registration_notice: None,
            regulation: None,
            error: None,
        }
    }

    fn failed(location: Option<String>, message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::new(IdentifyStatus::Failed, location)
        }
    }
}

/// POST /api/identify - Identify a catch and look up its regulations.
pub async fn identify_catch(
    State(state): State<AppState>,
    Json(request): Json<IdentifyRequest>,
) -> Result<Json<IdentifyResponse>, ApiError> {
    let image = match request.image_base64.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => Some(
            CapturedImage::from_base64(encoded)
                .map_err(|e| ApiError::BadRequest(format!("Invalid image encoding: {}", e)))?,
        ),
        _ => None,
    };
    let coordinate = match (request.latitude, request.longitude) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };
    let location = coordinate.map(|c| c.to_string());

    let submission = Submission::new(image, coordinate);
    if submission.image.is_none() || submission.coordinate.is_none() {
        return Ok(Json(IdentifyResponse::new(IdentifyStatus::Skipped, location)));
    }

    let Some(orchestrator) = state.orchestrator.clone() else {
        let message = state
            .config_error
            .clone()
            .unwrap_or_else(|| catchguide::error::MISSING_KEY_MESSAGE.to_string());
        return Ok(Json(IdentifyResponse::failed(location, message)));
    };

    // The gateway blocks on HTTP; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || orchestrator.submit(submission))
        .await
        .map_err(|e| ApiError::Internal(format!("Workflow task failed: {}", e)))?;

    let response = match outcome {
        Outcome::Skipped => IdentifyResponse::new(IdentifyStatus::Skipped, location),
        Outcome::Failed { message } => IdentifyResponse::failed(location, message),
        Outcome::Completed(report) => IdentifyResponse {
            identification: Some(report.identification),
            species: Some(report.species.to_string()),
            registration_notice: Some(report.registration_notice),
            regulation: Some(report.regulation),
            ..IdentifyResponse::new(IdentifyStatus::Completed, location)
        },
    };

    Ok(Json(response))
}
