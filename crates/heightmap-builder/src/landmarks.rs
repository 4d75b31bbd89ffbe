//! Spot checks of known landmarks against the resampled grid.

use crate::config::Landmark;
use crate::grid::OutputGrid;
use crate::heightmap::ElevationGrid;
use tracing::{info, warn};

/// Elevation found at a landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkReading {
    pub name: String,
    /// Elevation in metres of the cell containing the landmark.
    pub elevation: f32,
    pub expected: String,
}

/// Look up and log the elevation at each landmark inside the grid.
///
/// Landmarks outside the grid are skipped.
pub fn spot_check(
    grid: &OutputGrid,
    elevations: &ElevationGrid,
    landmarks: &[Landmark],
) -> Vec<LandmarkReading> {
    let mut readings = Vec::with_capacity(landmarks.len());

    for landmark in landmarks {
        let Some(elevation) = grid
            .cell_at(landmark.easting, landmark.northing)
            .and_then(|(row, col)| elevations.get(row, col))
        else {
            warn!(
                "{} ({}, {}) is outside the output grid",
                landmark.name, landmark.easting, landmark.northing
            );
            continue;
        };

        info!(
            "  {}: {:.1}m (expected {})",
            landmark.name, elevation, landmark.expected
        );
        readings.push(LandmarkReading {
            name: landmark.name.clone(),
            elevation,
            expected: landmark.expected.clone(),
        });
    }

    readings
}
