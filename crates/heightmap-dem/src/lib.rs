//! # heightmap-dem
//!
//! Georeferenced Digital Elevation Model rasters read from GeoTIFF tiles.
//!
//! ## Overview
//!
//! Source tiles such as the Copernicus DEM 30 m COGs store elevation samples
//! on a regular latitude/longitude grid. The grid is tied to the globe by two
//! GeoTIFF tags:
//! - ModelTiepointTag (33922): the coordinate of the top-left corner
//! - ModelPixelScaleTag (33550): degrees per pixel along each axis
//!
//! [`GeoRaster`] keeps the samples in memory and answers elevation queries by
//! bilinear interpolation, clamping at the raster edges.
//!
//! ## Example
//!
//! ```no_run
//! use heightmap_dem::GeoRaster;
//!
//! let tile = GeoRaster::from_file("Copernicus_DSM_COG_10_N51_00_W001_00_DEM.tif")?;
//! let elevation = tile.sample_bilinear(51.5079, -0.1281);
//! println!("Trafalgar Square: {elevation:.1} m");
//! # Ok::<(), heightmap_dem::DemError>(())
//! ```

mod error;
mod raster;

pub use error::DemError;
pub use raster::{GeoRaster, TileBounds, MODEL_PIXEL_SCALE_TAG, MODEL_TIEPOINT_TAG};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
