//! Score landing points, build decay grids and inspect scenarios.
//!
//! Usage:
//!   lri score --lat 37.46 --lon 126.44 --wing-type rotary
//!   lri grid --lat 35.5 --lon 128.0 --lri 72.5
//!   lri scenario warning --url http://localhost:8000

use anyhow::Result;
use clap::{Parser, Subcommand};

use lri_cli::render::{render_grid, render_report, render_scenario};
use lri_cli::LriClient;
use lri_core::safer_spot::DEFAULT_STEP_DEG;
use lri_core::{assess, build_decay_grid, AircraftParams, GeoPoint, Scenario, ScenarioReport, ScoringRules};

/// Landing Risk Index tools
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// LRI Server URL; computes locally when omitted
    #[arg(long, global = true)]
    url: Option<String>,

    /// Print raw JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a landing point
    Score {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Aircraft category, echoed in the report
        #[arg(long)]
        uam_type: Option<String>,
        /// "fixed" or "rotary"
        #[arg(long)]
        wing_type: Option<String>,
    },
    /// Build the decayed LRI grid around a point
    Grid {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// LRI at the center cell
        #[arg(long)]
        lri: f64,
        /// Cells per side (odd)
        #[arg(long, default_value_t = 9)]
        grid_size: usize,
        /// Cell edge in degrees
        #[arg(long, default_value_t = 0.05)]
        cell_size: f64,
    },
    /// Score a named preset (very_good, warning, severe, hard_stop, random)
    Scenario { name: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let client = args.url.as_deref().map(LriClient::new);
    let rules = ScoringRules::default();

    match args.command {
        Command::Score {
            lat,
            lon,
            uam_type,
            wing_type,
        } => {
            let point = GeoPoint::new(lat, lon);
            if !point.is_valid() {
                anyhow::bail!("Coordinates out of range: ({}, {})", lat, lon);
            }
            let params = AircraftParams { uam_type, wing_type };
            let report = match &client {
                Some(client) => client.score(point, &params)?,
                None => assess(point, &params, &rules, DEFAULT_STEP_DEG, &mut rand::rng())?,
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Command::Grid {
            lat,
            lon,
            lri,
            grid_size,
            cell_size,
        } => {
            let center = GeoPoint::new(lat, lon);
            let grid = match &client {
                Some(client) => client.grid(center, lri, Some(grid_size), Some(cell_size))?,
                None => build_decay_grid(center, lri, grid_size, cell_size)?.to_feature_collection(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_grid(&grid));
            }
        }
        Command::Scenario { name } => {
            let report = match &client {
                Some(client) => client.scenario(&name)?,
                None => ScenarioReport::build(Scenario::parse(&name)?, &rules)?,
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_scenario(&report));
            }
        }
    }

    Ok(())
}
