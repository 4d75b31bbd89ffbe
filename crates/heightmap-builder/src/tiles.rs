//! The pair of source tiles either side of the 0° meridian.

use crate::error::BuildError;
use heightmap_dem::GeoRaster;
use heightmap_geodesy::GeoPoint;
use std::path::Path;
use tracing::info;

/// Two 1°×1° DEM tiles meeting at the prime meridian.
///
/// Tile choice is by longitude sign only: this is not a general mosaic.
#[derive(Debug, Clone)]
pub struct MeridianTiles {
    /// Tile covering longitudes below 0°.
    pub west: GeoRaster,
    /// Tile covering longitudes from 0° upward.
    pub east: GeoRaster,
}

impl MeridianTiles {
    pub fn new(west: GeoRaster, east: GeoRaster) -> Self {
        Self { west, east }
    }

    /// Load both tiles, failing before reading anything if either is absent.
    pub fn load(west: &Path, east: &Path) -> Result<Self, BuildError> {
        ensure_exists(west)?;
        ensure_exists(east)?;

        let tiles = Self::new(GeoRaster::from_file(west)?, GeoRaster::from_file(east)?);

        for (label, tile) in [("W", &tiles.west), ("E", &tiles.east)] {
            let bounds = tile.extent();
            let (min, max) = tile.elevation_range();
            info!(
                "{} tile: lon [{:.1}, {:.1}], lat [{:.1}, {:.1}], elev {:.1} to {:.1}m",
                label, bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat, min, max
            );
        }

        Ok(tiles)
    }

    /// The tile responsible for a longitude.
    pub fn select(&self, lon: f64) -> &GeoRaster {
        if lon < 0.0 {
            &self.west
        } else {
            &self.east
        }
    }

    /// Bilinear elevation at a point from the responsible tile.
    pub fn sample(&self, point: GeoPoint) -> f64 {
        self.select(point.lon).sample_bilinear(point.lat, point.lon)
    }
}

/// Fail with [`BuildError::MissingInput`] if a source file does not exist.
pub fn ensure_exists(path: &Path) -> Result<(), BuildError> {
    if path.exists() {
        Ok(())
    } else {
        Err(BuildError::MissingInput(path.to_path_buf()))
    }
}
