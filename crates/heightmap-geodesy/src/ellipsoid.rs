//! Reference ellipsoids and geodetic/Cartesian conversions.

/// Maximum number of latitude refinements when converting Cartesian to geodetic.
const MAX_GEODETIC_ITERATIONS: usize = 10;

/// Latitude convergence threshold in radians.
const GEODETIC_TOLERANCE_RAD: f64 = 1e-12;

/// A reference ellipsoid defined by its two semi-axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis in metres.
    pub a: f64,
    /// Semi-minor (polar) axis in metres.
    pub b: f64,
    /// First eccentricity squared: 1 - b²/a².
    pub e2: f64,
}

/// Airy 1830, the ellipsoid of the OSGB36 datum.
pub const AIRY_1830: Ellipsoid = Ellipsoid::new(6_377_563.396, 6_356_256.909);

/// WGS84, the ellipsoid of the satellite datum used by global DEMs.
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_356_752.3142);

/// Earth-centred, earth-fixed Cartesian coordinate in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ellipsoid {
    /// Create an ellipsoid from its semi-major and semi-minor axes.
    pub const fn new(a: f64, b: f64) -> Self {
        Self {
            a,
            b,
            e2: 1.0 - (b * b) / (a * a),
        }
    }

    /// Third flattening `n = (a - b) / (a + b)`, the expansion variable of the
    /// meridional arc series.
    pub fn third_flattening(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }

    /// Radius of curvature in the prime vertical at the given latitude (radians).
    pub fn prime_vertical_radius(&self, lat: f64) -> f64 {
        let sin_lat = lat.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }

    /// Convert a geodetic position on the ellipsoid surface (radians, zero
    /// height) to Cartesian coordinates.
    pub fn to_cartesian(&self, lat: f64, lon: f64) -> Cartesian {
        let nu = self.prime_vertical_radius(lat);
        let cos_lat = lat.cos();

        Cartesian {
            x: nu * cos_lat * lon.cos(),
            y: nu * cos_lat * lon.sin(),
            z: nu * (1.0 - self.e2) * lat.sin(),
        }
    }

    /// Convert a Cartesian position to geodetic latitude and longitude (radians).
    ///
    /// Latitude has no closed form on an oblate ellipsoid, so it is refined
    /// iteratively until successive estimates differ by less than 1e-12 rad
    /// (at most 10 iterations). Height is discarded.
    pub fn to_geodetic(&self, point: Cartesian) -> (f64, f64) {
        let lon = point.y.atan2(point.x);
        let p = point.x.hypot(point.y);

        let mut lat = point.z.atan2(p * (1.0 - self.e2));
        for _ in 0..MAX_GEODETIC_ITERATIONS {
            let nu = self.prime_vertical_radius(lat);
            let next = (point.z + self.e2 * nu * lat.sin()).atan2(p);
            if (next - lat).abs() < GEODETIC_TOLERANCE_RAD {
                break;
            }
            lat = next;
        }

        (lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eccentricity() {
        assert_relative_eq!(AIRY_1830.e2, 0.006_670_540_074_149_134, epsilon = 1e-12);
        assert_relative_eq!(WGS84.e2, 0.006_694_380_004_260_814, epsilon = 1e-12);
    }

    #[test]
    fn test_cartesian_round_trip() {
        let lat = 51.5_f64.to_radians();
        let lon = (-0.12_f64).to_radians();

        let cartesian = WGS84.to_cartesian(lat, lon);
        let (lat2, lon2) = WGS84.to_geodetic(cartesian);

        assert_relative_eq!(lat, lat2, epsilon = 1e-11);
        assert_relative_eq!(lon, lon2, epsilon = 1e-12);
    }

    #[test]
    fn test_cartesian_on_equator_and_pole() {
        let equator = AIRY_1830.to_cartesian(0.0, 0.0);
        assert_relative_eq!(equator.x, AIRY_1830.a, epsilon = 1e-6);
        assert_relative_eq!(equator.y, 0.0);
        assert_relative_eq!(equator.z, 0.0);

        let pole = AIRY_1830.to_cartesian(std::f64::consts::FRAC_PI_2, 0.0);
        assert_relative_eq!(pole.z, AIRY_1830.b, epsilon = 1e-6);
    }
}
