//! Ellipsoidal Transverse Mercator projection.
//!
//! Implements the series formulae published by the Ordnance Survey for the
//! National Grid ("A Guide to Coordinate Systems in Great Britain", annex C).
//! The inverse recovers latitude by iterating on the meridional arc, then
//! applies a 7th-order series in the easting offset. Coefficients must be
//! reproduced exactly: small errors silently cost metres of accuracy.

use crate::ellipsoid::{Ellipsoid, AIRY_1830};

/// Maximum number of latitude refinements in the inverse projection.
const MAX_ARC_ITERATIONS: usize = 10;

/// Meridional arc residual (metres) below which the latitude is accepted.
const ARC_TOLERANCE_M: f64 = 1e-5;

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    /// Ellipsoid the projection is defined on.
    pub ellipsoid: Ellipsoid,
    /// Scale factor on the central meridian (F0).
    pub scale_factor: f64,
    /// Latitude of true origin in radians (φ0).
    pub origin_lat: f64,
    /// Longitude of true origin in radians (λ0).
    pub origin_lon: f64,
    /// Easting of true origin in metres (E0).
    pub false_easting: f64,
    /// Northing of true origin in metres (N0).
    pub false_northing: f64,
}

/// The OSGB36 National Grid (EPSG:27700): true origin 49°N 2°W on Airy 1830.
pub const NATIONAL_GRID: TransverseMercator = TransverseMercator {
    ellipsoid: AIRY_1830,
    scale_factor: 0.999_601_271_7,
    origin_lat: 49.0 * std::f64::consts::PI / 180.0,
    origin_lon: -2.0 * std::f64::consts::PI / 180.0,
    false_easting: 400_000.0,
    false_northing: -100_000.0,
};

/// Curvature terms evaluated at a latitude, shared by both directions.
struct Curvature {
    /// Radius of curvature in the prime vertical, scaled by F0.
    nu: f64,
    /// Radius of curvature in the meridian, scaled by F0.
    rho: f64,
    /// η² = ν/ρ - 1.
    eta2: f64,
}

impl TransverseMercator {
    /// Meridional arc (metres, scaled by F0) from the origin latitude to `lat`.
    pub fn meridional_arc(&self, lat: f64) -> f64 {
        let n = self.ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;

        let diff = lat - self.origin_lat;
        let sum = lat + self.origin_lat;

        let ma = (1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3) * diff;
        let mb = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * diff.sin() * sum.cos();
        let mc = (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * diff).sin() * (2.0 * sum).cos();
        let md = 35.0 / 24.0 * n3 * (3.0 * diff).sin() * (3.0 * sum).cos();

        self.ellipsoid.b * self.scale_factor * (ma - mb + mc - md)
    }

    fn curvature(&self, lat: f64) -> Curvature {
        let a_f0 = self.ellipsoid.a * self.scale_factor;
        let e2 = self.ellipsoid.e2;
        let sin_lat = lat.sin();
        let w = 1.0 - e2 * sin_lat * sin_lat;

        let nu = a_f0 / w.sqrt();
        let rho = a_f0 * (1.0 - e2) / w.powf(1.5);

        Curvature {
            nu,
            rho,
            eta2: nu / rho - 1.0,
        }
    }

    /// Project easting/northing (metres) to latitude/longitude (radians) on
    /// this projection's ellipsoid.
    ///
    /// There is no range check: inputs far from the grid degrade gracefully
    /// through the same formulae.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let a_f0 = self.ellipsoid.a * self.scale_factor;
        let target = northing - self.false_northing;

        let mut lat = self.origin_lat + target / a_f0;
        let mut arc = self.meridional_arc(lat);
        for _ in 0..MAX_ARC_ITERATIONS {
            lat += (target - arc) / a_f0;
            arc = self.meridional_arc(lat);
            if (target - arc).abs() < ARC_TOLERANCE_M {
                break;
            }
        }

        let Curvature { nu, rho, eta2 } = self.curvature(lat);
        let cos_lat = lat.cos();
        let tan_lat = lat.tan();
        let tan2 = tan_lat * tan_lat;
        let tan4 = tan2 * tan2;
        let tan6 = tan4 * tan2;
        let nu3 = nu.powi(3);
        let nu5 = nu.powi(5);
        let nu7 = nu.powi(7);

        let vii = tan_lat / (2.0 * rho * nu);
        let viii = tan_lat / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
        let ix = tan_lat / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
        let x = 1.0 / (cos_lat * nu);
        let xi = 1.0 / (6.0 * cos_lat * nu3) * (nu / rho + 2.0 * tan2);
        let xii = 1.0 / (120.0 * cos_lat * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
        let xiia = 1.0 / (5040.0 * cos_lat * nu7)
            * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

        let de = easting - self.false_easting;
        let de2 = de * de;
        let de3 = de2 * de;
        let de4 = de2 * de2;
        let de5 = de4 * de;
        let de6 = de4 * de2;
        let de7 = de6 * de;

        let out_lat = lat - vii * de2 + viii * de4 - ix * de6;
        let out_lon = self.origin_lon + x * de - xi * de3 + xii * de5 - xiia * de7;

        (out_lat, out_lon)
    }

    /// Project latitude/longitude (radians) on this projection's ellipsoid to
    /// easting/northing (metres).
    pub fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let Curvature { nu, rho, eta2 } = self.curvature(lat);
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let cos3 = cos_lat.powi(3);
        let cos5 = cos_lat.powi(5);
        let tan2 = lat.tan().powi(2);
        let tan4 = tan2 * tan2;

        let i = self.meridional_arc(lat) + self.false_northing;
        let ii = nu / 2.0 * sin_lat * cos_lat;
        let iii = nu / 24.0 * sin_lat * cos3 * (5.0 - tan2 + 9.0 * eta2);
        let iiia = nu / 720.0 * sin_lat * cos5 * (61.0 - 58.0 * tan2 + tan4);
        let iv = nu * cos_lat;
        let v = nu / 6.0 * cos3 * (nu / rho - tan2);
        let vi = nu / 120.0 * cos5 * (5.0 - 18.0 * tan2 + tan4 + 14.0 * eta2 - 58.0 * tan2 * eta2);

        let p = lon - self.origin_lon;
        let p2 = p * p;

        let northing = i + ii * p2 + iii * p2 * p2 + iiia * p2 * p2 * p2;
        let easting = self.false_easting + iv * p + v * p2 * p + vi * p2 * p2 * p;

        (easting, northing)
    }
}
