//! Blocking HTTP client for the LRI server.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::Serialize;

use lri_core::{AircraftParams, FeatureCollection, GeoPoint, LriReport, ScenarioReport};

#[derive(Debug, Serialize)]
struct ScoreBody<'a> {
    lat: f64,
    lon: f64,
    #[serde(flatten)]
    params: &'a AircraftParams,
}

#[derive(Debug, Serialize)]
struct GridBody {
    lat: f64,
    lon: f64,
    lri: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    grid_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cell_size: Option<f64>,
}

pub struct LriClient {
    client: Client,
    base_url: String,
}

impl LriClient {
    /// Create a client for a server base URL (e.g., "http://localhost:8000").
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn score(&self, point: GeoPoint, params: &AircraftParams) -> Result<LriReport> {
        let response = self
            .client
            .post(format!("{}/api/calculate_lri", self.base_url))
            .json(&ScoreBody {
                lat: point.lat,
                lon: point.lon,
                params,
            })
            .send()
            .context("Failed to send score request")?;

        check(response)?
            .json()
            .context("Failed to parse score response")
    }

    pub fn grid(
        &self,
        center: GeoPoint,
        lri: f64,
        grid_size: Option<usize>,
        cell_size: Option<f64>,
    ) -> Result<FeatureCollection> {
        let response = self
            .client
            .post(format!("{}/api/grid", self.base_url))
            .json(&GridBody {
                lat: center.lat,
                lon: center.lon,
                lri,
                grid_size,
                cell_size,
            })
            .send()
            .context("Failed to send grid request")?;

        check(response)?
            .json()
            .context("Failed to parse grid response")
    }

    pub fn scenario(&self, name: &str) -> Result<ScenarioReport> {
        let response = self
            .client
            .get(format!("{}/api/scenarios/{}", self.base_url, name))
            .send()
            .context("Failed to send scenario request")?;

        check(response)?
            .json()
            .context("Failed to parse scenario response")
    }
}

/// Turn a non-success response into an error carrying the server's message.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    bail!("Server returned {}: {}", status, error_message(&body));
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
