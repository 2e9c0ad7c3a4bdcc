//! Named measurement presets for demos and regression checks.

use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::MeasurementRecord;
use crate::rules::ScoringRules;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown scenario '{0}' (expected very_good, warning, severe, hard_stop or random)")]
pub struct ScenarioError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    VeryGood,
    Warning,
    Severe,
    HardStop,
    Random,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::VeryGood,
        Scenario::Warning,
        Scenario::Severe,
        Scenario::HardStop,
        Scenario::Random,
    ];

    pub fn parse(value: &str) -> Result<Self, ScenarioError> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "very_good" | "good" => Ok(Self::VeryGood),
            "warning" => Ok(Self::Warning),
            "severe" => Ok(Self::Severe),
            "hard_stop" => Ok(Self::HardStop),
            "random" => Ok(Self::Random),
            _ => Err(ScenarioError(value.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::VeryGood => "very_good",
            Scenario::Warning => "warning",
            Scenario::Severe => "severe",
            Scenario::HardStop => "hard_stop",
            Scenario::Random => "random",
        }
    }

    /// Preset record. `Random` draws from the thread-local generator.
    pub fn record(&self) -> MeasurementRecord {
        self.record_with_rng(&mut rand::rng())
    }

    pub fn record_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> MeasurementRecord {
        let limits = ScoringRules::default();
        let al_h = limits.alert_limit_horizontal_m;
        let al_v = limits.alert_limit_vertical_m;
        match self {
            Scenario::VeryGood => MeasurementRecord {
                actual_visibility: 60.0,
                required_visibility: 30.0,
                alpha_cloud: 0.0,
                hpl: al_h,
                vpl: al_v,
                alpha_terrain: 0.01,
                r_och_neg: 0.0,
                ctbt: 273.0,
                delta_sigma_0: 0.0,
                core_percent: 0.0,
            },
            Scenario::Warning => MeasurementRecord {
                actual_visibility: 1.0,
                required_visibility: 30.0,
                alpha_cloud: 0.892,
                hpl: 78.0,
                vpl: 50.0,
                alpha_terrain: 0.01,
                r_och_neg: 0.0,
                ctbt: 273.0,
                delta_sigma_0: 0.5,
                core_percent: 5.0,
            },
            Scenario::Severe => MeasurementRecord {
                actual_visibility: 0.05,
                required_visibility: 30.0,
                alpha_cloud: 0.99,
                hpl: 59.6,
                vpl: 50.0,
                alpha_terrain: 0.9,
                r_och_neg: 0.1,
                ctbt: 273.0,
                delta_sigma_0: 2.0,
                core_percent: 10.0,
            },
            Scenario::HardStop => MeasurementRecord {
                actual_visibility: 50.0,
                required_visibility: 30.0,
                alpha_cloud: 0.05,
                hpl: al_h + 20.0,
                vpl: al_v,
                alpha_terrain: 0.05,
                r_och_neg: 0.0,
                ctbt: 230.0,
                delta_sigma_0: 4.0,
                core_percent: 40.0,
            },
            Scenario::Random => MeasurementRecord {
                actual_visibility: rng.random_range(25.0..60.0),
                required_visibility: 30.0,
                alpha_cloud: rng.random_range(0.05..0.4),
                ctbt: *[273.0, 273.0, 273.0, 230.0].choose(rng).unwrap_or(&273.0),
                hpl: al_h + [0.0, 0.0, 0.0, 15.0].choose(rng).unwrap_or(&0.0),
                vpl: al_v + [0.0, 0.0, 0.0, 10.0].choose(rng).unwrap_or(&0.0),
                alpha_terrain: rng.random_range(0.01..0.3),
                r_och_neg: rng.random_range(0.0..0.1),
                delta_sigma_0: rng.random_range(0.0..4.0),
                core_percent: *[5.0, 30.0, 40.0].choose(rng).unwrap_or(&5.0),
            },
        }
    }
}
