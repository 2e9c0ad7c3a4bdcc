//! Decayed-LRI grid around a scored point, for choropleth rendering.
//!
//! Values fall off linearly with distance from the center cell and reach
//! zero at the corners.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spatial::GeoPoint;

/// Largest accepted cells-per-side.
pub const MAX_GRID_SIZE: usize = 101;

/// Largest accepted grid edge (`grid_size * cell_size_deg`) in degrees.
pub const MAX_GRID_SPAN_DEG: f64 = 20.0;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid size must be odd and between 3 and {max}, got {0}", max = MAX_GRID_SIZE)]
    InvalidSize(usize),
    #[error("cell size must be a positive number of degrees, got {0}")]
    InvalidCellSize(f64),
    #[error("grid spans {0} degrees per side, limit is {max}", max = MAX_GRID_SPAN_DEG)]
    SpanTooLarge(f64),
    #[error("center LRI must be within 0..=100, got {0}")]
    LriOutOfRange(f64),
}

/// Axis-aligned cell bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl CellBounds {
    /// Closed ring in GeoJSON `[lon, lat]` order, first point repeated last.
    pub fn ring(&self) -> [[f64; 2]; 5] {
        [
            [self.min_lon, self.min_lat],
            [self.max_lon, self.min_lat],
            [self.max_lon, self.max_lat],
            [self.min_lon, self.max_lat],
            [self.min_lon, self.min_lat],
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Row index, 0 is the northernmost row
    pub row: usize,
    /// Column index, 0 is the westernmost column
    pub col: usize,
    /// Cell offset from the center in grid units (east positive)
    pub dx: i64,
    /// Cell offset from the center in grid units (north positive)
    pub dy: i64,
    pub center: GeoPoint,
    pub bounds: CellBounds,
    pub decay: f64,
    pub lri: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayGrid {
    pub center: GeoPoint,
    pub center_lri: f64,
    pub grid_size: usize,
    pub cell_size_deg: f64,
    pub cells: Vec<GridCell>,
}

/// Linear decay factor for a cell at `(dx, dy)` grid units from center.
pub fn decay_factor(dx: i64, dy: i64, center_offset: i64) -> f64 {
    let distance = ((dx * dx + dy * dy) as f64).sqrt();
    let max_dist = ((2 * center_offset * center_offset) as f64).sqrt();
    (1.0 - distance / max_dist).max(0.0)
}

/// Build a `grid_size` x `grid_size` grid of decayed LRI values.
pub fn build_decay_grid(
    center: GeoPoint,
    center_lri: f64,
    grid_size: usize,
    cell_size_deg: f64,
) -> Result<DecayGrid, GridError> {
    if !(3..=MAX_GRID_SIZE).contains(&grid_size) || grid_size % 2 == 0 {
        return Err(GridError::InvalidSize(grid_size));
    }
    if !cell_size_deg.is_finite() || cell_size_deg <= 0.0 {
        return Err(GridError::InvalidCellSize(cell_size_deg));
    }
    if !(0.0..=100.0).contains(&center_lri) {
        return Err(GridError::LriOutOfRange(center_lri));
    }
    let span = grid_size as f64 * cell_size_deg;
    if span > MAX_GRID_SPAN_DEG {
        return Err(GridError::SpanTooLarge(span));
    }

    let center_offset = ((grid_size - 1) / 2) as i64;
    let half = cell_size_deg / 2.0;
    let mut cells = Vec::with_capacity(grid_size * grid_size);

    for row in 0..grid_size {
        for col in 0..grid_size {
            let dx = col as i64 - center_offset;
            let dy = center_offset - row as i64;
            let cell_center =
                center.offset_deg(dy as f64 * cell_size_deg, dx as f64 * cell_size_deg);
            let decay = decay_factor(dx, dy, center_offset);

            cells.push(GridCell {
                row,
                col,
                dx,
                dy,
                center: cell_center,
                bounds: CellBounds {
                    min_lat: cell_center.lat - half,
                    min_lon: cell_center.lon - half,
                    max_lat: cell_center.lat + half,
                    max_lon: cell_center.lon + half,
                },
                decay,
                lri: center_lri * decay,
            });
        }
    }

    Ok(DecayGrid {
        center,
        center_lri,
        grid_size,
        cell_size_deg,
        cells,
    })
}

impl DecayGrid {
    pub fn cell(&self, dx: i64, dy: i64) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.dx == dx && cell.dy == dy)
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: self
                .cells
                .iter()
                .map(|cell| Feature {
                    kind: "Feature".to_string(),
                    geometry: Geometry {
                        kind: "Polygon".to_string(),
                        coordinates: vec![cell.bounds.ring().to_vec()],
                    },
                    properties: CellProperties {
                        lri: cell.lri,
                        decay: cell.decay,
                        row: cell.row,
                        col: cell.col,
                    },
                })
                .collect(),
        }
    }
}

// === GeoJSON ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: CellProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProperties {
    pub lri: f64,
    pub decay: f64,
    pub row: usize,
    pub col: usize,
}
