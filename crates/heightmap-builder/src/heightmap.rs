//! Elevation grids and their 16-bit quantization.

use crate::error::BuildError;

/// Largest 16-bit pixel value.
pub const MAX_PIXEL: f64 = u16::MAX as f64;

/// Summary statistics of an elevation grid, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Row-major grid of elevations in metres, row 0 northernmost.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ElevationGrid {
    /// Wrap row-major values, which must number `width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self, BuildError> {
        if values.len() != width * height {
            return Err(BuildError::ElevationGrid {
                width,
                height,
                len: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Elevation of a cell, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.height && col < self.width {
            Some(self.values[row * self.width + col])
        } else {
            None
        }
    }

    /// Minimum, maximum and mean elevation.
    pub fn stats(&self) -> ElevationStats {
        let (min, max, sum) = self.values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| {
                let v = f64::from(v);
                (min.min(v), max.max(v), sum + v)
            },
        );

        ElevationStats {
            min,
            max,
            mean: sum / self.values.len() as f64,
        }
    }
}

/// Multiplier mapping `[min, max]` onto `[0, 65535]`.
///
/// A flat grid (`max == min`) uses a scale of 1 so every pixel quantizes to 0.
pub fn quantization_scale(min: f64, max: f64) -> f64 {
    if max > min {
        MAX_PIXEL / (max - min)
    } else {
        1.0
    }
}

/// Elevation grid rescaled into the full 16-bit range.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedHeightmap {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
    stats: ElevationStats,
}

impl QuantizedHeightmap {
    /// Quantize a grid: `pixel = round((elevation - min) * scale)`.
    ///
    /// Rounding to nearest keeps the reconstruction error within half a
    /// quantization step.
    pub fn from_grid(grid: &ElevationGrid) -> Self {
        let stats = grid.stats();
        let scale = quantization_scale(stats.min, stats.max);

        let pixels = grid
            .values()
            .iter()
            .map(|&v| ((f64::from(v) - stats.min) * scale).round().clamp(0.0, MAX_PIXEL) as u16)
            .collect();

        Self {
            width: grid.width(),
            height: grid.height(),
            pixels,
            stats,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Unquantized statistics of the source grid.
    pub fn stats(&self) -> ElevationStats {
        self.stats
    }

    /// Reconstruct the elevation a pixel value stands for.
    pub fn decode(&self, pixel: u16) -> f64 {
        decode_pixel(pixel, self.stats.min, self.stats.max)
    }
}

/// `elevation = pixel / 65535 * (max - min) + min`.
pub fn decode_pixel(pixel: u16, min: f64, max: f64) -> f64 {
    f64::from(pixel) / MAX_PIXEL * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats() {
        let grid = ElevationGrid::new(2, 2, vec![0.0, 10.0, 20.0, 50.0]).expect("grid");
        let stats = grid.stats();

        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 50.0);
        assert_relative_eq!(stats.mean, 20.0);
    }

    #[test]
    fn test_quantize_spans_full_range() {
        let grid = ElevationGrid::new(3, 1, vec![12.0, 37.0, 112.0]).expect("grid");
        let heightmap = QuantizedHeightmap::from_grid(&grid);

        assert_eq!(heightmap.pixels()[0], 0);
        assert_eq!(heightmap.pixels()[2], u16::MAX);
        // (37 - 12) * 65535 / 100 = 16383.75
        assert_eq!(heightmap.pixels()[1], 16384);
    }

    #[test]
    fn test_round_trip_within_half_step() {
        let values: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.731).sin() * 150.0 + 160.0).collect();
        let grid = ElevationGrid::new(100, 10, values.clone()).expect("grid");
        let heightmap = QuantizedHeightmap::from_grid(&grid);

        let stats = heightmap.stats();
        let half_step = (stats.max - stats.min) / MAX_PIXEL / 2.0;
        for (&value, &pixel) in values.iter().zip(heightmap.pixels()) {
            let decoded = heightmap.decode(pixel);
            assert!(
                (decoded - f64::from(value)).abs() <= half_step + 1e-9,
                "{value} decoded as {decoded}"
            );
        }
    }

    #[test]
    fn test_flat_grid_uses_unit_scale() {
        assert_eq!(quantization_scale(42.0, 42.0), 1.0);

        let grid = ElevationGrid::new(2, 2, vec![42.0; 4]).expect("grid");
        let heightmap = QuantizedHeightmap::from_grid(&grid);

        assert!(heightmap.pixels().iter().all(|&p| p == 0));
        assert_eq!(heightmap.decode(0), 42.0);
    }

    #[test]
    fn test_rejects_wrong_value_count() {
        let err = ElevationGrid::new(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::ElevationGrid {
                width: 2,
                height: 2,
                len: 3
            }
        ));
        assert!(ElevationGrid::new(2, 2, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_get_out_of_range() {
        let grid = ElevationGrid::new(2, 1, vec![1.0, 2.0]).expect("grid");
        assert_eq!(grid.get(0, 1), Some(2.0));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }
}
