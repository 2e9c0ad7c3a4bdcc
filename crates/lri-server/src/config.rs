//! Server configuration from environment.

use std::collections::HashSet;
use std::env;

/// Local frontend origins that are always allowed.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://127.0.0.1:3000", "http://localhost:3000"];

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Origins allowed by CORS. `*` allows any origin without credentials.
    pub allowed_origins: HashSet<String>,
    /// GeoJSON boundary drawn on the map page (optional at runtime)
    pub boundary_path: String,
    pub grid_size: usize,
    pub grid_cell_deg: f64,
    pub safer_spot_step_deg: f64,
    pub map_center_lat: f64,
    pub map_center_lon: f64,
    pub map_zoom: u8,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            allowed_origins: parse_origins(None),
            boundary_path: "data/incheon_fir.geojson".to_string(),
            grid_size: 9,
            grid_cell_deg: 0.05,
            safer_spot_step_deg: lri_core::safer_spot::DEFAULT_STEP_DEG,
            map_center_lat: 35.5,
            map_center_lon: 128.0,
            map_zoom: 6,
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_env("LRI_PORT").unwrap_or(defaults.server_port),
            allowed_origins: parse_origins(env::var("LRI_ALLOWED_ORIGINS").ok().as_deref()),
            boundary_path: env::var("LRI_BOUNDARY_PATH").unwrap_or(defaults.boundary_path),
            grid_size: parse_env("LRI_GRID_SIZE").unwrap_or(defaults.grid_size),
            grid_cell_deg: parse_env("LRI_GRID_CELL_DEG").unwrap_or(defaults.grid_cell_deg),
            safer_spot_step_deg: parse_env("LRI_SAFER_SPOT_STEP_DEG")
                .unwrap_or(defaults.safer_spot_step_deg),
            map_center_lat: parse_env("LRI_MAP_CENTER_LAT").unwrap_or(defaults.map_center_lat),
            map_center_lon: parse_env("LRI_MAP_CENTER_LON").unwrap_or(defaults.map_center_lon),
            map_zoom: parse_env("LRI_MAP_ZOOM").unwrap_or(defaults.map_zoom),
            log_json: env::var("LRI_LOG_FORMAT")
                .map(|value| value.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Defaults plus a comma-separated list of extra origins.
///
/// Trailing slashes are stripped since browsers never send them in `Origin`.
pub fn parse_origins(raw: Option<&str>) -> HashSet<String> {
    let mut origins: HashSet<String> = DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.to_string())
        .collect();
    if let Some(raw) = raw {
        origins.extend(
            raw.split(',')
                .map(|origin| origin.trim().trim_end_matches('/'))
                .filter(|origin| !origin.is_empty())
                .map(str::to_string),
        );
    }
    origins
}
