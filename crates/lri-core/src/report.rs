//! Assembled score report: result, evidence breakdown and suggestion.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{AircraftParams, HardStopReason, MeasurementRecord, ScoreResult};
use crate::rules::ScoringRules;
use crate::safer_spot::{suggest_safer_spot, SaferSpot};
use crate::scenarios::Scenario;
use crate::scoring::{score_with_rules, ScoreError};
use crate::simulator::simulate_with_rules;
use crate::spatial::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LriReport {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub location: String,
    #[serde(rename = "Evidence")]
    pub evidence: Evidence,
    #[serde(rename = "SaferSpot", default)]
    pub safer_spot: Option<SaferSpot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uam_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wing_type: Option<String>,
}

/// Per-dimension inputs behind each sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub weather: WeatherEvidence,
    pub navigation: NavigationEvidence,
    pub terrain: TerrainEvidence,
    #[serde(default)]
    pub hard_stop: Vec<HardStopEvidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEvidence {
    pub score: f64,
    pub actual_visibility: f64,
    pub required_visibility: f64,
    pub alpha_cloud: f64,
    #[serde(rename = "CTBT")]
    pub ctbt: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEvidence {
    pub score: f64,
    #[serde(rename = "HPL")]
    pub hpl: f64,
    #[serde(rename = "VPL")]
    pub vpl: f64,
    #[serde(rename = "AL_H")]
    pub alert_limit_horizontal_m: f64,
    #[serde(rename = "AL_V")]
    pub alert_limit_vertical_m: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainEvidence {
    pub score: f64,
    pub alpha_terrain: f64,
    pub r_och_neg: f64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardStopEvidence {
    pub reason: HardStopReason,
    pub description: String,
}

impl Evidence {
    pub fn new(record: &MeasurementRecord, result: &ScoreResult, rules: &ScoringRules) -> Self {
        Self {
            weather: WeatherEvidence {
                score: result.w_score,
                actual_visibility: record.actual_visibility,
                required_visibility: record.required_visibility,
                alpha_cloud: record.alpha_cloud,
                ctbt: record.ctbt,
                summary: format!(
                    "Weather (W:{}): cloud attenuation {:.2} applied, visibility {:.1}m of {:.1}m required.",
                    result.w_score,
                    record.alpha_cloud,
                    record.actual_visibility,
                    record.required_visibility
                ),
            },
            navigation: NavigationEvidence {
                score: result.n_score,
                hpl: record.hpl,
                vpl: record.vpl,
                alert_limit_horizontal_m: rules.alert_limit_horizontal_m,
                alert_limit_vertical_m: rules.alert_limit_vertical_m,
                summary: format!(
                    "Navigation (N:{}): HPL={:.1}m, VPL={:.1}m.",
                    result.n_score, record.hpl, record.vpl
                ),
            },
            terrain: TerrainEvidence {
                score: result.t_score,
                alpha_terrain: record.alpha_terrain,
                r_och_neg: record.r_och_neg,
                summary: format!(
                    "Terrain (T:{}): terrain complexity {:.2} and obstacle violations {:.2} applied.",
                    result.t_score, record.alpha_terrain, record.r_och_neg
                ),
            },
            hard_stop: result
                .hard_stop_reasons
                .iter()
                .map(|reason| HardStopEvidence {
                    reason: *reason,
                    description: reason.description().to_string(),
                })
                .collect(),
        }
    }
}

pub fn format_location(point: GeoPoint) -> String {
    format!("Lat: {:.4}, Lon: {:.4}", point.lat, point.lon)
}

/// Simulate, score and explain the point, with a safer-spot suggestion
/// when the grade is below the best tier.
pub fn assess<R: Rng + ?Sized>(
    point: GeoPoint,
    params: &AircraftParams,
    rules: &ScoringRules,
    safer_spot_step_deg: f64,
    rng: &mut R,
) -> Result<LriReport, ScoreError> {
    let record = simulate_with_rules(point.lat, point.lon, params, rules);
    let result = score_with_rules(&record, rules)?;
    let safer_spot =
        suggest_safer_spot(point, &result, params, rules, safer_spot_step_deg, rng);

    Ok(LriReport {
        evidence: Evidence::new(&record, &result, rules),
        location: format_location(point),
        result,
        safer_spot,
        uam_type: params.uam_type.clone(),
        wing_type: params.wing_type.clone(),
    })
}

/// A named preset scored without location context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub record: MeasurementRecord,
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(rename = "Evidence")]
    pub evidence: Evidence,
}

impl ScenarioReport {
    pub fn build(scenario: Scenario, rules: &ScoringRules) -> Result<Self, ScoreError> {
        let record = scenario.record();
        let result = score_with_rules(&record, rules)?;
        Ok(Self {
            scenario: scenario.name().to_string(),
            evidence: Evidence::new(&record, &result, rules),
            record,
            result,
        })
    }
}
