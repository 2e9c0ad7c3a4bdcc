//! Safer landing-spot suggestion around a poorly graded point.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{AircraftParams, Grade, ScoreResult};
use crate::rules::ScoringRules;
use crate::scoring::{score_with_rules, ScoreError};
use crate::simulator::simulate_with_rules;
use crate::spatial::{bearing_deg, haversine_distance, GeoPoint};

/// Default neighbor spacing in degrees.
pub const DEFAULT_STEP_DEG: f64 = 0.2;

/// A scored point.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub point: GeoPoint,
    pub result: ScoreResult,
}

/// What the suggestion looks like on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaferSpot {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "LRI")]
    pub lri: f64,
    #[serde(rename = "Grade")]
    pub grade: Grade,
    pub distance_km: f64,
    pub bearing_deg: f64,
}

impl SaferSpot {
    pub fn from_candidate(origin: GeoPoint, candidate: &Candidate) -> Self {
        let p = candidate.point;
        Self {
            lat: p.lat,
            lon: p.lon,
            lri: candidate.result.lri,
            grade: candidate.result.grade,
            distance_km: haversine_distance(origin.lat, origin.lon, p.lat, p.lon) / 1000.0,
            bearing_deg: bearing_deg(origin.lat, origin.lon, p.lat, p.lon),
        }
    }
}

/// The eight points at `±step_deg` around `center`.
pub fn neighbor_points(center: GeoPoint, step_deg: f64) -> Vec<GeoPoint> {
    let mut points = Vec::with_capacity(8);
    for d_lat in [-1.0, 0.0, 1.0] {
        for d_lon in [-1.0, 0.0, 1.0] {
            if d_lat == 0.0 && d_lon == 0.0 {
                continue;
            }
            points.push(center.offset_deg(d_lat * step_deg, d_lon * step_deg));
        }
    }
    points
}

/// Pick a safer spot among already-scored neighbors.
///
/// A best-tier candidate (no hard stop, LRI at or above `tau_yellow`) wins
/// if any exist. Otherwise any candidate better than the center qualifies.
/// Ties within a tier are broken at random. Returns `None` when the center
/// is already best-tier or nothing qualifies.
pub fn choose_safer_spot<'a, R: Rng + ?Sized>(
    center: &ScoreResult,
    neighbors: &'a [Candidate],
    rules: &ScoringRules,
    rng: &mut R,
) -> Option<&'a Candidate> {
    if center.grade == Grade::Green {
        return None;
    }

    let best_tier: Vec<&Candidate> = neighbors
        .iter()
        .filter(|c| !c.result.hard_stop && c.result.lri >= rules.tau_yellow)
        .collect();
    if let Some(choice) = best_tier.choose(rng) {
        return Some(*choice);
    }

    let better: Vec<&Candidate> = neighbors
        .iter()
        .filter(|c| is_better(&c.result, center))
        .collect();
    better.choose(rng).copied()
}

fn is_better(candidate: &ScoreResult, center: &ScoreResult) -> bool {
    if candidate.hard_stop {
        return false;
    }
    center.hard_stop || candidate.lri > center.lri
}

/// Simulate, score and search the neighborhood of `center`.
///
/// Neighbors whose records fail to score are skipped.
pub fn suggest_safer_spot<R: Rng + ?Sized>(
    center: GeoPoint,
    center_result: &ScoreResult,
    params: &AircraftParams,
    rules: &ScoringRules,
    step_deg: f64,
    rng: &mut R,
) -> Option<SaferSpot> {
    if center_result.grade == Grade::Green {
        return None;
    }

    let neighbors: Vec<Candidate> = neighbor_points(center, step_deg)
        .into_iter()
        .filter(GeoPoint::is_valid)
        .filter_map(|point| {
            score_neighbor(point, params, rules)
                .ok()
                .map(|result| Candidate { point, result })
        })
        .collect();

    choose_safer_spot(center_result, &neighbors, rules, rng)
        .map(|candidate| SaferSpot::from_candidate(center, candidate))
}

fn score_neighbor(
    point: GeoPoint,
    params: &AircraftParams,
    rules: &ScoringRules,
) -> Result<ScoreResult, ScoreError> {
    let record = simulate_with_rules(point.lat, point.lon, params, rules);
    score_with_rules(&record, rules)
}
