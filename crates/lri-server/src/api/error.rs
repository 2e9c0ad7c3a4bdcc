//! API error type and its HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lri_core::{GridError, ScenarioError, ScoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Latitude (lat) and Longitude (lon) are required.")]
    MissingCoordinates,
    #[error("Latitude/longitude out of range: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
    #[error("Center LRI (lri) is required and must be between 0 and 100.")]
    InvalidLri,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("LRI computation failed: {0}")]
    Computation(#[from] ScoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCoordinates
            | ApiError::InvalidCoordinates { .. }
            | ApiError::InvalidLri
            | ApiError::InvalidBody(_)
            | ApiError::Grid(_) => StatusCode::BAD_REQUEST,
            ApiError::Scenario(_) => StatusCode::NOT_FOUND,
            ApiError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Computation(err) => {
                tracing::error!("LRI computation failed: {}", err);
                "LRI computation failed".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::MissingCoordinates.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(GridError::InvalidSize(1)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ScenarioError("nope".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ScoreError::NonFinite { field: "W" }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
