//! Landing Risk Index (LRI) core: scoring, decay grid, safer-spot search
//! and the coordinate-seeded measurement simulator.

pub mod grid;
pub mod models;
pub mod report;
pub mod rules;
pub mod safer_spot;
pub mod scenarios;
pub mod scoring;
pub mod simulator;
pub mod spatial;

pub use grid::{build_decay_grid, DecayGrid, FeatureCollection, GridCell, GridError};
pub use models::{AircraftParams, Grade, HardStopReason, MeasurementRecord, ScoreResult, WingType};
pub use report::{assess, Evidence, LriReport, ScenarioReport};
pub use rules::ScoringRules;
pub use safer_spot::{choose_safer_spot, suggest_safer_spot, Candidate, SaferSpot};
pub use scenarios::{Scenario, ScenarioError};
pub use scoring::{score, score_with_rules, ScoreError};
pub use simulator::{simulate, simulate_with_rules};
pub use spatial::{haversine_distance, GeoPoint};
