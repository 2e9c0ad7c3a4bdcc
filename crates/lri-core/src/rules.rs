//! Scoring weights, alert limits and grade thresholds for the LRI model.

use serde::{Deserialize, Serialize};

/// Configuration for LRI scoring (rotary-wing baseline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Weight of the weather sub-score
    pub weight_weather: f64,
    /// Weight of the navigation-integrity sub-score
    pub weight_navigation: f64,
    /// Weight of the terrain sub-score (also folded into the raw terrain score)
    pub weight_terrain: f64,
    /// Horizontal alert limit in meters (APV-I)
    pub alert_limit_horizontal_m: f64,
    /// Vertical alert limit in meters (APV-I)
    pub alert_limit_vertical_m: f64,
    /// LRI below this is the severe tier
    pub tau_red: f64,
    /// LRI below this (and at or above `tau_red`) is the warning tier
    pub tau_yellow: f64,
    /// Reserved upper threshold. Not used by grading.
    pub tau_blue: f64,
    /// Hard stop when CTBT falls below this
    pub ctbt_hard_stop: f64,
    /// Hard stop when delta_sigma_0 exceeds this (together with `core_percent_hard_stop`)
    pub delta_sigma_hard_stop: f64,
    /// Minimum core percentage for the anomaly hard stop
    pub core_percent_hard_stop: f64,
    /// Floor applied to the normalized terrain score before combining
    pub terrain_floor: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            weight_weather: 0.45,
            weight_navigation: 0.35,
            weight_terrain: 0.20,
            alert_limit_horizontal_m: 40.0,
            alert_limit_vertical_m: 50.0,
            tau_red: 60.0,
            tau_yellow: 80.0,
            tau_blue: 90.0,
            ctbt_hard_stop: 235.0,
            delta_sigma_hard_stop: 3.0,
            core_percent_hard_stop: 30.0,
            terrain_floor: 5.0,
        }
    }
}

impl ScoringRules {
    /// Sum of the three sub-score weights. Should be 1.0.
    pub fn weight_sum(&self) -> f64 {
        self.weight_weather + self.weight_navigation + self.weight_terrain
    }
}
