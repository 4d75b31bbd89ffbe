//! Error types for the DEM crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading DEM rasters.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// Invalid GeoTIFF - missing required georeferencing tags.
    #[error("Invalid GeoTIFF {path}: {reason}")]
    InvalidGeoTiff {
        /// File that was being read.
        path: PathBuf,
        /// What was missing or malformed.
        reason: String,
    },

    /// Raster has zero width or height.
    #[error("Raster has no samples ({width}x{height})")]
    EmptyRaster {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Sample count does not match the raster dimensions.
    #[error("Raster of {width}x{height} pixels needs {expected} samples, got {actual}")]
    DimensionMismatch {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Number of samples implied by the dimensions.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },
}
