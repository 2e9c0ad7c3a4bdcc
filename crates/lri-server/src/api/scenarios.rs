//! Named scenario endpoint for demos and frontend checks.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use lri_core::{Scenario, ScenarioReport};

use crate::api::error::ApiError;
use crate::state::AppState;

pub async fn get_scenario(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ScenarioReport>, ApiError> {
    let scenario = Scenario::parse(&name)?;
    let report = ScenarioReport::build(scenario, state.rules())?;
    tracing::debug!("Scenario {} scored {} ({})", report.scenario, report.result.lri, report.result.grade);
    Ok(Json(report))
}
