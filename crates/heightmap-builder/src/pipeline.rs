//! End-to-end heightmap build.

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::grid::OutputGrid;
use crate::heightmap::{ElevationStats, QuantizedHeightmap};
use crate::landmarks::{spot_check, LandmarkReading};
use crate::metadata::HeightmapMetadata;
use crate::output::{write_metadata, write_png};
use crate::resample::resample;
use crate::tiles::MeridianTiles;
use heightmap_geodesy::{CoordinateTransform, NationalGridToWgs84};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Summary of a completed build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub heightmap_path: PathBuf,
    pub metadata_path: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Unquantized elevation statistics in metres.
    pub stats: ElevationStats,
    pub landmarks: Vec<LandmarkReading>,
    pub metadata: HeightmapMetadata,
}

/// Build the heightmap described by `config` using the National Grid to
/// WGS84 transform.
pub fn run(config: &BuildConfig) -> Result<BuildReport, BuildError> {
    run_with_transform(config, &NationalGridToWgs84::default())
}

/// Build the heightmap with an arbitrary grid-to-geographic transform.
///
/// Inputs are checked before any work starts, and outputs are written only
/// once the whole grid has been computed, so a failed run leaves nothing
/// behind.
pub fn run_with_transform<T>(config: &BuildConfig, transform: &T) -> Result<BuildReport, BuildError>
where
    T: CoordinateTransform + ?Sized,
{
    let grid = OutputGrid::new(config.grid.bounds, config.grid.pixel_size_m)?;

    info!("Loading DEM tiles...");
    let tiles = MeridianTiles::load(&config.tiles.west_path(), &config.tiles.east_path())?;

    let bounds = grid.bounds();
    info!(
        "Output grid: {}x{} pixels, {}m resolution",
        grid.width(),
        grid.height(),
        grid.pixel_size()
    );
    info!(
        "Grid bounds: E [{}, {}], N [{}, {}]",
        bounds.min_e, bounds.max_e, bounds.min_n, bounds.max_n
    );

    info!("Converting grid to geographic coordinates and sampling...");
    let start = Instant::now();
    let elevations = resample(&grid, transform, &tiles)?;
    let stats = elevations.stats();
    info!(
        "Sampled {} pixels in {:.2}s",
        elevations.values().len(),
        start.elapsed().as_secs_f64()
    );
    info!(
        "Elevation range: {:.1} - {:.1}m (mean {:.1}m)",
        stats.min, stats.max, stats.mean
    );

    info!("Spot checks:");
    let landmarks = spot_check(&grid, &elevations, &config.landmarks);

    let heightmap = QuantizedHeightmap::from_grid(&elevations);
    let metadata =
        HeightmapMetadata::new(&config.grid, &grid, &stats, &config.output.heightmap);

    std::fs::create_dir_all(&config.output.dir)?;

    let heightmap_path = config.output.heightmap_path();
    write_png(&heightmap_path, &heightmap)?;
    info!("Written: {}", heightmap_path.display());

    let metadata_path = config.output.metadata_path();
    write_metadata(&metadata_path, &metadata)?;
    info!("Written: {}", metadata_path.display());

    Ok(BuildReport {
        heightmap_path,
        metadata_path,
        width: grid.width(),
        height: grid.height(),
        stats,
        landmarks,
        metadata,
    })
}
