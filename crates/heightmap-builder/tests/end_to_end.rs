//! End-to-end resampling of synthetic tiles through a linear stand-in transform.

use heightmap_builder::{
    resample, GridBounds, GridConfig, HeightmapMetadata, MeridianTiles, OutputGrid,
    QuantizedHeightmap,
};
use heightmap_dem::GeoRaster;
use heightmap_geodesy::{CoordinateTransform, GeoPoint};

/// One kilometre of grid per degree: lon = E / 1000, lat = N / 1000.
struct KilometreDegrees;

impl CoordinateTransform for KilometreDegrees {
    fn to_geographic(&self, easting: f64, northing: f64) -> GeoPoint {
        GeoPoint::new(northing / 1000.0, easting / 1000.0)
    }
}

/// West tile covers lon -2..0, east tile lon 0..2, both lat 2..0 at 1°/px.
fn tiles() -> MeridianTiles {
    let west = GeoRaster::new(vec![0.0, 10.0, 20.0, 30.0], 2, 2, -2.0, 2.0, 1.0, -1.0)
        .expect("west raster");
    let east = GeoRaster::new(vec![40.0, 64.0, -30.0, -50.0], 2, 2, 0.0, 2.0, 1.0, -1.0)
        .expect("east raster");
    MeridianTiles::new(west, east)
}

/// 2x2 grid whose cell centres map to (lat, lon) = (1.5|0.5, ±0.5).
fn grid() -> OutputGrid {
    let bounds = GridBounds {
        min_e: -1000.0,
        min_n: 0.0,
        max_e: 1000.0,
        max_n: 2000.0,
    };
    OutputGrid::new(bounds, 1000.0).expect("grid")
}

#[test]
fn test_resampled_elevations() {
    let elevations = resample(&grid(), &KilometreDegrees, &tiles()).expect("resample");

    // NW: west tile, last column, halfway down the rows -> (10 + 30) / 2
    // NE: east tile, centre of all four samples -> (40 + 64 - 30 - 50) / 4
    // SW: west tile, bottom-right edge -> 30
    // SE: east tile, bottom row, halfway across -> (-30 - 50) / 2, clamped to 0
    assert_eq!(elevations.values(), &[20.0, 6.0, 30.0, 0.0]);
}

#[test]
fn test_quantized_output_and_metadata() {
    let grid = grid();
    let elevations = resample(&grid, &KilometreDegrees, &tiles()).expect("resample");
    let heightmap = QuantizedHeightmap::from_grid(&elevations);

    // scale = 65535 / 30 = 2184.5
    assert_eq!(heightmap.pixels(), &[43690, 13107, 65535, 0]);

    let stats = heightmap.stats();
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 30.0);
    assert_eq!(stats.mean, 14.0);

    let config = GridConfig {
        crs: "TEST:1".to_string(),
        ..GridConfig::default()
    };
    let metadata = HeightmapMetadata::new(&config, &grid, &stats, "test.png");
    assert_eq!(metadata.elev_min_m, 0.0);
    assert_eq!(metadata.elev_max_m, 30.0);
    assert_eq!(metadata.bounds_m, [-1000.0, 0.0, 1000.0, 2000.0]);
    assert_eq!((metadata.width, metadata.height), (2, 2));

    for (&pixel, &elevation) in heightmap.pixels().iter().zip(elevations.values()) {
        assert_eq!(metadata.elevation_at(pixel), f64::from(elevation));
    }
}
