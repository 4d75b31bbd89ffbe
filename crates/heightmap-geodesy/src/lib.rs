//! # heightmap-geodesy
//!
//! Closed-form conversion from British National Grid easting/northing
//! (OSGB36 datum, Airy 1830 ellipsoid) to WGS84 latitude/longitude.
//!
//! The conversion is composed of two steps:
//! - **Inverse Transverse Mercator**: grid coordinates to OSGB36 latitude/longitude
//! - **Helmert datum shift**: OSGB36 to WGS84 via earth-centred Cartesian coordinates
//!
//! Every function here is pure and infallible. Accuracy is limited by the
//! published 7-parameter Helmert shift (a few metres), not by the series.
//!
//! ## Example
//!
//! ```
//! use heightmap_geodesy::{bng_to_wgs84, CoordinateTransform, NationalGridToWgs84};
//!
//! // Trafalgar Square
//! let point = bng_to_wgs84(530_050.0, 180_550.0);
//! assert!((point.lat - 51.509).abs() < 0.001);
//! assert!((point.lon + 0.127).abs() < 0.001);
//!
//! let same = NationalGridToWgs84::default().to_geographic(530_050.0, 180_550.0);
//! assert_eq!(point, same);
//! ```

mod ellipsoid;
mod helmert;
mod transverse_mercator;

pub use ellipsoid::{Cartesian, Ellipsoid, AIRY_1830, WGS84};
pub use helmert::{HelmertTransform, OSGB36_TO_WGS84};
pub use transverse_mercator::{TransverseMercator, NATIONAL_GRID};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees (positive = north).
    pub lat: f64,
    /// Longitude in degrees (negative = west).
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Maps projected grid coordinates to geographic coordinates.
///
/// Implementations must be pure: the same input always yields the same
/// output, so callers may evaluate cells in any order or in parallel.
pub trait CoordinateTransform: Sync {
    /// Convert an easting/northing pair (metres) to latitude/longitude (degrees).
    fn to_geographic(&self, easting: f64, northing: f64) -> GeoPoint;
}

/// National Grid (OSGB36) easting/northing to WGS84 latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalGridToWgs84 {
    /// Projection of the local grid.
    pub projection: TransverseMercator,
    /// Datum shift from the projection's ellipsoid to the target ellipsoid.
    pub datum_shift: HelmertTransform,
    /// Ellipsoid of the target datum.
    pub target: Ellipsoid,
}

impl Default for NationalGridToWgs84 {
    fn default() -> Self {
        Self {
            projection: NATIONAL_GRID,
            datum_shift: OSGB36_TO_WGS84,
            target: WGS84,
        }
    }
}

impl NationalGridToWgs84 {
    /// Shift a latitude/longitude (radians) on the local datum to the target
    /// datum, returning degrees.
    pub fn shift_datum(&self, lat: f64, lon: f64) -> GeoPoint {
        let local = self.projection.ellipsoid.to_cartesian(lat, lon);
        let shifted = self.datum_shift.apply(local);
        let (lat, lon) = self.target.to_geodetic(shifted);

        GeoPoint::new(lat.to_degrees(), lon.to_degrees())
    }
}

impl CoordinateTransform for NationalGridToWgs84 {
    fn to_geographic(&self, easting: f64, northing: f64) -> GeoPoint {
        let (lat, lon) = self.projection.inverse(easting, northing);
        self.shift_datum(lat, lon)
    }
}

/// Convert a British National Grid easting/northing to WGS84 latitude/longitude.
pub fn bng_to_wgs84(easting: f64, northing: f64) -> GeoPoint {
    NationalGridToWgs84::default().to_geographic(easting, northing)
}
