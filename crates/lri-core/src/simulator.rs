//! Coordinate-seeded measurement simulator.
//!
//! Stands in for real weather, GNSS-integrity and terrain feeds. The
//! generator is seeded from the coordinate, so the same point always yields
//! the same record.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::models::{AircraftParams, MeasurementRecord, WingType};
use crate::rules::ScoringRules;

/// Longitude east of which terrain is treated as mountainous.
const MOUNTAIN_LON: f64 = 128.5;
/// Bounding box of the simulated convective storm cell (lat, lon).
const STORM_LAT: (f64, f64) = (34.0, 36.0);
const STORM_LON: (f64, f64) = (126.0, 128.0);
const STORM_CTBT: f64 = 230.0;
const CLEAR_CTBT: f64 = 273.0;
const ROTARY_TERRAIN_FACTOR: f64 = 1.2;

/// Seed derived from the coordinate truncated to 1/1000 degree.
pub fn coordinate_seed(lat: f64, lon: f64) -> u64 {
    let seed = (lat * 1000.0) as i64 + (lon * 1000.0) as i64;
    seed as u64
}

/// Generate a deterministic record for the coordinate.
pub fn simulate(lat: f64, lon: f64, params: &AircraftParams) -> MeasurementRecord {
    simulate_with_rules(lat, lon, params, &ScoringRules::default())
}

pub fn simulate_with_rules(
    lat: f64,
    lon: f64,
    params: &AircraftParams,
    rules: &ScoringRules,
) -> MeasurementRecord {
    let mut rng = StdRng::seed_from_u64(coordinate_seed(lat, lon));
    let al_h = rules.alert_limit_horizontal_m;
    let al_v = rules.alert_limit_vertical_m;

    // Weather front drifting across the region
    let weather_factor = ((lat / 10.0).sin() + (lon / 10.0).cos()) / 2.0;
    let alpha_cloud = interpolate(weather_factor, (-1.0, 1.0), (0.05, 0.7));
    let in_storm = lat > STORM_LAT.0 && lat < STORM_LAT.1 && lon > STORM_LON.0 && lon < STORM_LON.1;
    let ctbt = if in_storm { STORM_CTBT } else { CLEAR_CTBT };

    // 5% both limits exceeded, 20% degraded, 75% nominal
    let nav_roll: f64 = rng.random();
    let (hpl, vpl) = if nav_roll < 0.05 {
        (al_h + rng.random_range(1.0..15.0), al_v + rng.random_range(1.0..10.0))
    } else if nav_roll < 0.25 {
        (al_h - rng.random_range(10.0..20.0), al_v - rng.random_range(10.0..20.0))
    } else {
        (rng.random_range(10.0..al_h - 5.0), rng.random_range(10.0..al_v - 5.0))
    };

    let (mut alpha_terrain, r_och_neg) = if lon > MOUNTAIN_LON {
        (rng.random_range(0.1..0.3), rng.random_range(0.05..0.1))
    } else {
        (rng.random_range(0.01..0.05), rng.random_range(0.0..0.01))
    };
    if params.wing() == WingType::Rotary {
        alpha_terrain *= ROTARY_TERRAIN_FACTOR;
    }

    MeasurementRecord {
        actual_visibility: rng.random_range(25.0..60.0),
        required_visibility: 30.0,
        alpha_cloud,
        hpl,
        vpl,
        alpha_terrain,
        r_och_neg,
        ctbt,
        delta_sigma_0: rng.random_range(0.0..4.0),
        core_percent: *[5.0, 30.0, 40.0].choose(&mut rng).unwrap_or(&5.0),
    }
}

/// Piecewise-linear map of `x` from `from` onto `to`, clamped at both ends.
fn interpolate(x: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    if x <= from.0 {
        return to.0;
    }
    if x >= from.1 {
        return to.1;
    }
    let ratio = (x - from.0) / (from.1 - from.0);
    to.0 + (to.1 - to.0) * ratio
}
