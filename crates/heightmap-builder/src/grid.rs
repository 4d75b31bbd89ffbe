//! Regular output grid on the projected coordinate system.

use crate::config::GridBounds;
use crate::error::BuildError;

/// A north-up grid of square cells covering [`GridBounds`].
///
/// Row 0 is the northernmost row and column 0 the westernmost column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputGrid {
    bounds: GridBounds,
    pixel_size: f64,
    width: usize,
    height: usize,
}

impl OutputGrid {
    /// Create a grid, truncating partial cells at the east and south edges.
    pub fn new(bounds: GridBounds, pixel_size: f64) -> Result<Self, BuildError> {
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(BuildError::InvalidConfig(format!(
                "pixel size must be positive, got {pixel_size}"
            )));
        }
        if !(bounds.max_e > bounds.min_e && bounds.max_n > bounds.min_n) {
            return Err(BuildError::InvalidConfig(format!(
                "grid bounds are empty: E [{}, {}], N [{}, {}]",
                bounds.min_e, bounds.max_e, bounds.min_n, bounds.max_n
            )));
        }

        let width = ((bounds.max_e - bounds.min_e) / pixel_size).floor() as usize;
        let height = ((bounds.max_n - bounds.min_n) / pixel_size).floor() as usize;
        if width == 0 || height == 0 {
            return Err(BuildError::InvalidConfig(format!(
                "pixel size {pixel_size}m is larger than the grid bounds"
            )));
        }

        Ok(Self {
            bounds,
            pixel_size,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Ground resolution in metres per pixel.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Easting and northing of the centre of a cell.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let easting = self.bounds.min_e + (col as f64 + 0.5) * self.pixel_size;
        let northing = self.bounds.max_n - (row as f64 + 0.5) * self.pixel_size;
        (easting, northing)
    }

    /// Row and column of the cell containing a grid position, if any.
    ///
    /// Offsets are truncated toward zero, so a point less than one cell
    /// beyond the west or north edge lands in column or row 0.
    pub fn cell_at(&self, easting: f64, northing: f64) -> Option<(usize, usize)> {
        let col = ((easting - self.bounds.min_e) / self.pixel_size).trunc();
        let row = ((self.bounds.max_n - northing) / self.pixel_size).trunc();

        if col < 0.0 || row < 0.0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then_some((row, col))
    }
}
