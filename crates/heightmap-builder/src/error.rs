//! Error types for the heightmap build.

use heightmap_dem::DemError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a heightmap build.
///
/// Nothing is written to the output directory when any of these occur.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required source tile does not exist.
    #[error("Source tile not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Grid or output settings cannot produce a heightmap.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A source tile could not be read.
    #[error("DEM error: {0}")]
    Dem(#[from] DemError),

    /// I/O error creating or writing outputs, or reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed.
    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    /// Pixel buffer does not match the image dimensions.
    #[error("Heightmap buffer of {len} pixels does not fit {width}x{height}")]
    ImageBuffer {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
        /// Number of pixels supplied.
        len: usize,
    },

    /// Elevation values do not fill the grid.
    #[error("Elevation grid of {width}x{height} needs {} values, got {len}", .width * .height)]
    ElevationGrid {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
        /// Number of values supplied.
        len: usize,
    },

    /// Metadata serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
