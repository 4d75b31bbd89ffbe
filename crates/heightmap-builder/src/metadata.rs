//! JSON sidecar describing a heightmap.

use crate::config::GridConfig;
use crate::grid::OutputGrid;
use crate::heightmap::{decode_pixel, ElevationStats};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

/// Everything a consumer needs to place the heightmap and recover metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightmapMetadata {
    /// Description of the source data.
    pub source: String,
    /// Coordinate reference system of the grid, e.g. "EPSG:27700".
    pub crs: String,
    /// `[min_e, min_n, max_e, max_n]` in metres.
    #[serde(serialize_with = "serialize_metres_array")]
    pub bounds_m: [f64; 4],
    pub width: usize,
    pub height: usize,
    #[serde(serialize_with = "serialize_metres")]
    pub pixel_size_m: f64,
    /// Elevation of pixel value 0, rounded to centimetres.
    pub elev_min_m: f64,
    /// Elevation of pixel value 65535, rounded to centimetres.
    pub elev_max_m: f64,
    /// Filename of the 16-bit PNG.
    pub heightmap: String,
}

impl HeightmapMetadata {
    pub fn new(
        grid_config: &GridConfig,
        grid: &OutputGrid,
        stats: &ElevationStats,
        heightmap: &str,
    ) -> Self {
        Self {
            source: grid_config.source.clone(),
            crs: grid_config.crs.clone(),
            bounds_m: grid.bounds().as_array(),
            width: grid.width(),
            height: grid.height(),
            pixel_size_m: grid.pixel_size(),
            elev_min_m: round_cm(stats.min),
            elev_max_m: round_cm(stats.max),
            heightmap: heightmap.to_string(),
        }
    }

    /// Elevation in metres for a pixel value of the referenced heightmap.
    pub fn elevation_at(&self, pixel: u16) -> f64 {
        decode_pixel(pixel, self.elev_min_m, self.elev_max_m)
    }
}

fn round_cm(metres: f64) -> f64 {
    (metres * 100.0).round() / 100.0
}

/// Largest magnitude written as a JSON integer.
const MAX_INTEGER_METRES: f64 = 9_007_199_254_740_992.0;

/// Grid distances are whole metres in practice; write those as integers.
fn serialize_metres<S: Serializer>(metres: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if metres.fract() == 0.0 && metres.abs() <= MAX_INTEGER_METRES {
        serializer.serialize_i64(*metres as i64)
    } else {
        serializer.serialize_f64(*metres)
    }
}

fn serialize_metres_array<S: Serializer>(
    values: &[f64; 4],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    struct Metres(f64);

    impl Serialize for Metres {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_metres(&self.0, serializer)
        }
    }

    let mut tuple = serializer.serialize_tuple(values.len())?;
    for &value in values {
        tuple.serialize_element(&Metres(value))?;
    }
    tuple.end()
}
