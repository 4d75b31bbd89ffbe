//! # heightmap-builder
//!
//! Resample WGS84 Digital Elevation Model tiles onto a British National Grid
//! heightmap.
//!
//! ## Pipeline
//!
//! 1. Check that both source tiles exist, then load them
//! 2. Transform every output cell centre from the National Grid to WGS84
//! 3. Sample the tile on the cell's side of the 0° meridian, clamping at sea level
//! 4. Rescale the grid into the full 16-bit range
//! 5. Write a 16-bit grayscale PNG and a JSON sidecar with the elevation range
//!
//! The sidecar's `elev_min_m`/`elev_max_m` recover metres from a pixel value:
//! `elevation = pixel / 65535 * (max - min) + min`.
//!
//! ## Example
//!
//! ```no_run
//! use heightmap_builder::{run, BuildConfig};
//!
//! let report = run(&BuildConfig::default())?;
//! println!("{}x{} heightmap at {}", report.width, report.height, report.heightmap_path.display());
//! # Ok::<(), heightmap_builder::BuildError>(())
//! ```

mod config;
mod error;
mod grid;
mod heightmap;
mod landmarks;
mod metadata;
mod output;
mod pipeline;
mod resample;
mod tiles;

pub use config::{
    default_landmarks, BuildConfig, GridBounds, GridConfig, Landmark, OutputConfig, TileConfig,
};
pub use error::BuildError;
pub use grid::OutputGrid;
pub use heightmap::{
    decode_pixel, quantization_scale, ElevationGrid, ElevationStats, QuantizedHeightmap, MAX_PIXEL,
};
pub use landmarks::{spot_check, LandmarkReading};
pub use metadata::HeightmapMetadata;
pub use output::{write_metadata, write_png};
pub use pipeline::{run, run_with_transform, BuildReport};
pub use resample::{clamp_sea_level, resample};
pub use tiles::{ensure_exists, MeridianTiles};
