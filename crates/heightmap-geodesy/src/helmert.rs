//! Seven-parameter Helmert datum shift.

use crate::ellipsoid::Cartesian;

/// Radians per arcsecond.
const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// A small-angle similarity transform between two Cartesian datums.
///
/// Rotations are applied in linearised form, which holds for the
/// sub-arcsecond rotations between national and global datums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmertTransform {
    /// Translation along X in metres.
    pub tx: f64,
    /// Translation along Y in metres.
    pub ty: f64,
    /// Translation along Z in metres.
    pub tz: f64,
    /// Rotation about X in radians.
    pub rx: f64,
    /// Rotation about Y in radians.
    pub ry: f64,
    /// Rotation about Z in radians.
    pub rz: f64,
    /// Scale change as a fraction (ppm × 1e-6).
    pub scale: f64,
}

/// OSGB36 → WGS84 (Ordnance Survey published parameters, ~5 m accuracy).
pub const OSGB36_TO_WGS84: HelmertTransform =
    HelmertTransform::from_arcseconds(446.448, -125.157, 542.060, 0.1502, 0.2470, 0.8421, -20.4894);

impl HelmertTransform {
    /// Build a transform from translations in metres, rotations in arcseconds
    /// and scale in parts per million.
    pub const fn from_arcseconds(
        tx: f64,
        ty: f64,
        tz: f64,
        rx_arcsec: f64,
        ry_arcsec: f64,
        rz_arcsec: f64,
        scale_ppm: f64,
    ) -> Self {
        Self {
            tx,
            ty,
            tz,
            rx: rx_arcsec * ARCSEC_TO_RAD,
            ry: ry_arcsec * ARCSEC_TO_RAD,
            rz: rz_arcsec * ARCSEC_TO_RAD,
            scale: scale_ppm * 1e-6,
        }
    }

    /// Apply the transform to a Cartesian point.
    pub fn apply(&self, p: Cartesian) -> Cartesian {
        let s1 = 1.0 + self.scale;

        Cartesian {
            x: self.tx + s1 * p.x - self.rz * p.y + self.ry * p.z,
            y: self.ty + self.rz * p.x + s1 * p.y - self.rx * p.z,
            z: self.tz - self.ry * p.x + self.rx * p.y + s1 * p.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform() {
        let identity = HelmertTransform::from_arcseconds(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let p = Cartesian {
            x: 3_980_000.0,
            y: -8_000.0,
            z: 4_970_000.0,
        };

        assert_eq!(identity.apply(p), p);
    }

    #[test]
    fn test_pure_translation() {
        let shift = HelmertTransform::from_arcseconds(1.0, -2.0, 3.0, 0.0, 0.0, 0.0, 0.0);
        let out = shift.apply(Cartesian {
            x: 10.0,
            y: 20.0,
            z: 30.0,
        });

        assert_relative_eq!(out.x, 11.0);
        assert_relative_eq!(out.y, 18.0);
        assert_relative_eq!(out.z, 33.0);
    }

    #[test]
    fn test_osgb36_parameters() {
        assert_relative_eq!(OSGB36_TO_WGS84.rz, 4.082_616e-6, epsilon = 1e-11);
        assert_relative_eq!(OSGB36_TO_WGS84.scale, -2.048_94e-5, epsilon = 1e-15);
    }
}
