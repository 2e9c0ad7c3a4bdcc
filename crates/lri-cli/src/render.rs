//! Plain-text rendering of reports and grids for the terminal.

use std::fmt::Write;

use lri_core::{Evidence, FeatureCollection, Grade, LriReport, ScenarioReport, ScoreResult};

pub fn render_report(report: &LriReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.location);
    if let Some(wing) = &report.wing_type {
        let _ = writeln!(out, "Wing type: {}", wing);
    }
    if let Some(uam) = &report.uam_type {
        let _ = writeln!(out, "UAM type: {}", uam);
    }
    write_result(&mut out, &report.result, &report.evidence);
    match &report.safer_spot {
        Some(spot) => {
            let _ = writeln!(
                out,
                "Safer spot: ({:.4}, {:.4}) LRI {} {} - {:.1} km at {:.0} deg",
                spot.lat, spot.lon, spot.lri, spot.grade, spot.distance_km, spot.bearing_deg
            );
        }
        None if report.result.grade == Grade::Green => {}
        None => {
            let _ = writeln!(out, "Safer spot: none found nearby");
        }
    }
    out
}

pub fn render_scenario(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scenario: {}", report.scenario);
    write_result(&mut out, &report.result, &report.evidence);
    out
}

fn write_result(out: &mut String, result: &ScoreResult, evidence: &Evidence) {
    let _ = writeln!(out, "LRI: {} {}", result.lri, result.grade);
    let _ = writeln!(
        out,
        "W: {}  N: {}  T: {}",
        result.w_score, result.n_score, result.t_score
    );
    for summary in [
        &evidence.weather.summary,
        &evidence.navigation.summary,
        &evidence.terrain.summary,
    ] {
        let _ = writeln!(out, "  {}", summary);
    }
    for stop in &evidence.hard_stop {
        let _ = writeln!(out, "  HARD STOP: {}", stop.description);
    }
}

/// Cell LRI values laid out north-up, one grid row per line.
pub fn render_grid(grid: &FeatureCollection) -> String {
    let size = grid
        .features
        .iter()
        .map(|f| f.properties.row.max(f.properties.col) + 1)
        .max()
        .unwrap_or(0);
    let mut rows = vec![vec![f64::NAN; size]; size];
    for feature in &grid.features {
        rows[feature.properties.row][feature.properties.col] = feature.properties.lri;
    }

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|lri| format!("{:6.1}", lri)).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}
