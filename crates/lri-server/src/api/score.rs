//! LRI score endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use lri_core::{assess, AircraftParams, GeoPoint, LriReport};

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Urban air mobility category, echoed back in the response
    pub uam_type: Option<String>,
    /// `rotary` amplifies terrain attenuation in the simulated record
    pub wing_type: Option<String>,
}

impl ScoreRequest {
    pub fn point(&self) -> Result<GeoPoint, ApiError> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(ApiError::MissingCoordinates);
        };
        let point = GeoPoint::new(lat, lon);
        if !point.is_valid() {
            return Err(ApiError::InvalidCoordinates { lat, lon });
        }
        Ok(point)
    }
}

/// Simulate measurements at the coordinate and score them.
pub async fn calculate_lri(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<LriReport>, ApiError> {
    let Json(request) = payload?;
    let point = request.point()?;
    let params = AircraftParams {
        uam_type: request.uam_type,
        wing_type: request.wing_type,
    };

    let report = assess(
        point,
        &params,
        state.rules(),
        state.config().safer_spot_step_deg,
        &mut rand::rng(),
    )?;

    tracing::info!(
        lat = point.lat,
        lon = point.lon,
        lri = report.result.lri,
        grade = %report.result.grade,
        hard_stop = report.result.hard_stop,
        "Scored landing point"
    );
    if let Some(spot) = &report.safer_spot {
        tracing::debug!(
            "Suggested safer spot ({:.4}, {:.4}) at {:.1} km",
            spot.lat,
            spot.lon,
            spot.distance_km
        );
    }

    Ok(Json(report))
}
