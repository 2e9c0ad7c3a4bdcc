//! Core data models for the LRI engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Measurements at a single point, consumed once by the scorer.
///
/// Every field falls back to its baseline value when absent from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Observed slant visibility (m)
    #[serde(default = "defaults::actual_visibility")]
    pub actual_visibility: f64,
    /// Minimum visibility for the approach category (m)
    #[serde(default = "defaults::required_visibility")]
    pub required_visibility: f64,
    /// Cloud attenuation factor, 0-1
    #[serde(default = "defaults::alpha_cloud")]
    pub alpha_cloud: f64,
    /// Horizontal protection level (m)
    #[serde(rename = "HPL", default = "defaults::hpl")]
    pub hpl: f64,
    /// Vertical protection level (m)
    #[serde(rename = "VPL", default = "defaults::vpl")]
    pub vpl: f64,
    /// Terrain-complexity attenuation, 0-1
    #[serde(default = "defaults::alpha_terrain")]
    pub alpha_terrain: f64,
    /// Fraction of obstacle-clearance-height violations
    #[serde(default)]
    pub r_och_neg: f64,
    #[serde(rename = "CTBT", default = "defaults::ctbt")]
    pub ctbt: f64,
    #[serde(default)]
    pub delta_sigma_0: f64,
    #[serde(default)]
    pub core_percent: f64,
}

mod defaults {
    pub fn actual_visibility() -> f64 {
        50.0
    }
    pub fn required_visibility() -> f64 {
        30.0
    }
    pub fn alpha_cloud() -> f64 {
        0.1
    }
    pub fn hpl() -> f64 {
        35.0
    }
    pub fn vpl() -> f64 {
        45.0
    }
    pub fn alpha_terrain() -> f64 {
        0.05
    }
    pub fn ctbt() -> f64 {
        273.0
    }
}

impl Default for MeasurementRecord {
    fn default() -> Self {
        Self {
            actual_visibility: defaults::actual_visibility(),
            required_visibility: defaults::required_visibility(),
            alpha_cloud: defaults::alpha_cloud(),
            hpl: defaults::hpl(),
            vpl: defaults::vpl(),
            alpha_terrain: defaults::alpha_terrain(),
            r_och_neg: 0.0,
            ctbt: defaults::ctbt(),
            delta_sigma_0: 0.0,
            core_percent: 0.0,
        }
    }
}

impl MeasurementRecord {
    /// Field names paired with values, in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("actual_visibility", self.actual_visibility),
            ("required_visibility", self.required_visibility),
            ("alpha_cloud", self.alpha_cloud),
            ("HPL", self.hpl),
            ("VPL", self.vpl),
            ("alpha_terrain", self.alpha_terrain),
            ("r_och_neg", self.r_och_neg),
            ("CTBT", self.ctbt),
            ("delta_sigma_0", self.delta_sigma_0),
            ("core_percent", self.core_percent),
        ]
    }
}

/// Four-level landing grade, ordered from best to hard stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    /// LRI at or above the warning threshold
    Green,
    /// Warning tier
    Blue,
    /// Severe tier
    Yellow,
    /// Hard stop, regardless of LRI
    Red,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Green => "GREEN (VERY GOOD)",
            Grade::Blue => "BLUE (WARNING)",
            Grade::Yellow => "YELLOW (SEVERE)",
            Grade::Red => "RED (HARD STOP)",
        }
    }

    /// Accepts either the full label or the bare color word.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_uppercase();
        let color = value.split_whitespace().next().unwrap_or_default();
        match color {
            "GREEN" => Some(Grade::Green),
            "BLUE" => Some(Grade::Blue),
            "YELLOW" => Some(Grade::Yellow),
            "RED" => Some(Grade::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Grade::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown grade '{}'", raw)))
    }
}

/// Which hard-stop rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardStopReason {
    /// CTBT below the severe threshold
    Ctbt,
    /// HPL and VPL both above their alert limits
    ProtectionLevels,
    /// delta_sigma_0 anomaly with a large core percentage
    CoreAnomaly,
}

impl HardStopReason {
    pub fn description(&self) -> &'static str {
        match self {
            HardStopReason::Ctbt => "CTBT below severe-convection threshold",
            HardStopReason::ProtectionLevels => "HPL and VPL both exceed alert limits",
            HardStopReason::CoreAnomaly => "delta_sigma_0 anomaly with large core percentage",
        }
    }
}

/// Output of the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(rename = "LRI")]
    pub lri: f64,
    #[serde(rename = "Grade")]
    pub grade: Grade,
    #[serde(rename = "W_score")]
    pub w_score: f64,
    #[serde(rename = "N_score")]
    pub n_score: f64,
    #[serde(rename = "T_score")]
    pub t_score: f64,
    #[serde(rename = "HardStop")]
    pub hard_stop: bool,
    #[serde(rename = "HardStopReasons", default)]
    pub hard_stop_reasons: Vec<HardStopReason>,
}

/// Airframe class used by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WingType {
    #[default]
    Fixed,
    Rotary,
}

impl WingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "rotary" | "rotor" | "rotorcraft" | "multirotor" => Some(Self::Rotary),
            "fixed" | "fixed_wing" | "fixed-wing" | "lift_cruise" | "tilt" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// Aircraft parameters accompanying a score request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftParams {
    #[serde(default)]
    pub uam_type: Option<String>,
    #[serde(default)]
    pub wing_type: Option<String>,
}

impl AircraftParams {
    /// Unrecognized wing types are treated as fixed wing.
    pub fn wing(&self) -> WingType {
        self.wing_type
            .as_deref()
            .and_then(WingType::parse)
            .unwrap_or_default()
    }
}
