//! Decayed-LRI grid endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use lri_core::{build_decay_grid, FeatureCollection, GeoPoint};

use crate::api::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GridRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// LRI at the center cell, within 0..=100
    pub lri: Option<f64>,
    /// Cells per side, odd; defaults to the configured size
    pub grid_size: Option<usize>,
    /// Cell edge in degrees; defaults to the configured size
    pub cell_size: Option<f64>,
}

/// Build a GeoJSON polygon grid with linearly decayed LRI per cell.
pub async fn build_grid(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GridRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let Json(request) = payload?;
    let (Some(lat), Some(lon)) = (request.lat, request.lon) else {
        return Err(ApiError::MissingCoordinates);
    };
    let center = GeoPoint::new(lat, lon);
    if !center.is_valid() {
        return Err(ApiError::InvalidCoordinates { lat, lon });
    }
    let lri = match request.lri {
        Some(lri) if (0.0..=100.0).contains(&lri) => lri,
        _ => return Err(ApiError::InvalidLri),
    };

    let config = state.config();
    let grid = build_decay_grid(
        center,
        lri,
        request.grid_size.unwrap_or(config.grid_size),
        request.cell_size.unwrap_or(config.grid_cell_deg),
    )?;

    tracing::debug!(
        "Built {}x{} decay grid around ({:.4}, {:.4})",
        grid.grid_size,
        grid.grid_size,
        lat,
        lon
    );
    Ok(Json(grid.to_feature_collection()))
}
