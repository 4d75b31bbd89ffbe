//! Resampling the source tiles onto the output grid.

use crate::error::BuildError;
use crate::grid::OutputGrid;
use crate::heightmap::ElevationGrid;
use crate::tiles::MeridianTiles;
use heightmap_geodesy::CoordinateTransform;
use rayon::prelude::*;

/// Sample every output cell centre from the source tiles.
///
/// Each cell is transformed to geographic coordinates, sampled from the tile
/// on its side of the meridian and clamped at sea level. Rows are filled in
/// parallel; every cell is independent and written exactly once, so the
/// result does not depend on scheduling.
pub fn resample<T>(
    grid: &OutputGrid,
    transform: &T,
    tiles: &MeridianTiles,
) -> Result<ElevationGrid, BuildError>
where
    T: CoordinateTransform + ?Sized,
{
    let width = grid.width();
    let mut values = vec![0.0_f32; width * grid.height()];

    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, cells)| {
            for (col, cell) in cells.iter_mut().enumerate() {
                let (easting, northing) = grid.cell_center(row, col);
                let point = transform.to_geographic(easting, northing);
                *cell = clamp_sea_level(tiles.sample(point));
            }
        });

    ElevationGrid::new(width, grid.height(), values)
}

/// Below-datum samples are treated as sea level.
pub fn clamp_sea_level(elevation: f64) -> f32 {
    elevation.max(0.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridBounds;
    use heightmap_dem::GeoRaster;
    use heightmap_geodesy::{GeoPoint, NationalGridToWgs84};

    #[test]
    fn test_clamp_sea_level() {
        assert_eq!(clamp_sea_level(-3.2), 0.0);
        assert_eq!(clamp_sea_level(-0.0), 0.0);
        assert_eq!(clamp_sea_level(12.5), 12.5);
    }

    /// Shifts grid metres into degrees so that cell centres land on known points.
    struct Offset;

    impl CoordinateTransform for Offset {
        fn to_geographic(&self, easting: f64, northing: f64) -> GeoPoint {
            GeoPoint::new(northing, easting)
        }
    }

    #[test]
    fn test_negative_samples_become_zero() {
        let below = GeoRaster::new(vec![-5.0; 4], 2, 2, -10.0, 10.0, 10.0, -10.0).expect("raster");
        let tiles = MeridianTiles::new(below.clone(), below);
        let bounds = GridBounds {
            min_e: -2.0,
            min_n: 0.0,
            max_e: 2.0,
            max_n: 2.0,
        };
        let grid = OutputGrid::new(bounds, 1.0).expect("grid");

        let elevations = resample(&grid, &Offset, &tiles).expect("resample");
        assert!(elevations.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_parallel_fill_matches_sequential() {
        let west = GeoRaster::new(
            (0..16).map(|i| i as f32 * 3.5).collect(),
            4,
            4,
            -1.0,
            52.0,
            0.25,
            -0.25,
        )
        .expect("raster");
        let east = GeoRaster::new(
            (0..16).map(|i| 100.0 - i as f32).collect(),
            4,
            4,
            0.0,
            52.0,
            0.25,
            -0.25,
        )
        .expect("raster");
        let tiles = MeridianTiles::new(west, east);

        // Straddles the meridian (~538.9 km easting)
        let bounds = GridBounds {
            min_e: 536_000.0,
            min_n: 178_000.0,
            max_e: 542_000.0,
            max_n: 181_000.0,
        };
        let grid = OutputGrid::new(bounds, 500.0).expect("grid");
        let transform = NationalGridToWgs84::default();

        let parallel = resample(&grid, &transform, &tiles).expect("resample");

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let (e, n) = grid.cell_center(row, col);
                let expected = clamp_sea_level(tiles.sample(transform.to_geographic(e, n)));
                assert_eq!(parallel.get(row, col), Some(expected));
            }
        }
    }
}
