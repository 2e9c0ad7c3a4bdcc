//! Map page: satellite tiles, FIR boundary overlay and click bridge.
//!
//! The page posts `MAP_CLICK` messages with the clicked coordinate to the
//! embedding window and places a marker on `ADD_MARKER` messages.

use axum::{extract::State, response::Html};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::state::AppState;

const TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const TILE_ATTRIBUTION: &str = "Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const FONT_AWESOME_CSS: &str =
    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@6.2.0/css/all.min.css";
const BEAUTIFY_MARKER_CSS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet-beautify-marker@1.0.9/dist/leaflet-beautify-marker.min.css";
const BEAUTIFY_MARKER_JS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet-beautify-marker@1.0.9/dist/leaflet-beautify-marker.min.js";

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("failed to read boundary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("boundary file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("boundary file is not a GeoJSON object")]
    NotGeoJson,
}

/// Read and sanity-check a GeoJSON boundary file.
pub async fn load_boundary(path: impl AsRef<Path>) -> Result<Value, BoundaryError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&raw)?;
    match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection" | "Feature" | "Polygon" | "MultiPolygon") => Ok(value),
        _ => Err(BoundaryError::NotGeoJson),
    }
}

/// Render the map. A missing or broken boundary file only drops the overlay.
pub async fn get_map(State(state): State<Arc<AppState>>) -> Html<String> {
    let config = state.config();
    let boundary = match load_boundary(&config.boundary_path).await {
        Ok(boundary) => Some(boundary),
        Err(err) => {
            tracing::warn!(
                "Could not load boundary GeoJSON {}: {}",
                config.boundary_path,
                err
            );
            None
        }
    };
    Html(render_map_page(config, boundary.as_ref()))
}

pub fn render_map_page(config: &Config, boundary: Option<&Value>) -> String {
    let boundary_js = boundary
        .map(|value| {
            format!(
                "L.geoJSON({}, {{style: {{color: 'yellow', weight: 2, fillOpacity: 0}}}}).addTo(map);",
                script_safe_json(value)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>LRI Map</title>
<link rel="stylesheet" href="{css}">
<script src="{js}"></script>
<link rel="stylesheet" href="{fa_css}">
<link rel="stylesheet" href="{beautify_css}">
<script src="{beautify_js}"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
L.Draggable.DRAGGING_THRESHOLD = 15;
var map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('{tiles}', {{attribution: '{attribution}'}}).addTo(map);
{boundary}
var planeIcon = L.BeautifyIcon.icon({{
    icon: 'plane',
    iconShape: 'circle',
    borderColor: 'gray',
    textColor: 'black',
    backgroundColor: 'transparent'
}});
var marker;
map.on('click', function(e) {{
    parent.postMessage({{type: 'MAP_CLICK', lat: e.latlng.lat, lon: e.latlng.lng}}, '*');
}});
window.addEventListener('message', function(event) {{
    var data = event.data || {{}};
    if (data.type === 'ADD_MARKER') {{
        if (marker) {{ map.removeLayer(marker); }}
        marker = L.marker([data.lat, data.lon], {{icon: planeIcon}}).addTo(map);
        map.setView([data.lat, data.lon], 8);
    }}
}});
</script>
</body>
</html>
"#,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        fa_css = FONT_AWESOME_CSS,
        beautify_css = BEAUTIFY_MARKER_CSS,
        beautify_js = BEAUTIFY_MARKER_JS,
        lat = config.map_center_lat,
        lon = config.map_center_lon,
        zoom = config.map_zoom,
        tiles = TILE_URL,
        attribution = TILE_ATTRIBUTION,
        boundary = boundary_js,
    )
}

/// JSON that cannot close the surrounding `<script>` element.
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
