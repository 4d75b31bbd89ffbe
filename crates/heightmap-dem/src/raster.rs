//! Georeferenced elevation raster.

use crate::{DemError, Result};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

/// GeoTIFF ModelTiepointTag: `[I, J, K, X, Y, Z]`.
pub const MODEL_TIEPOINT_TAG: u16 = 33922;

/// GeoTIFF ModelPixelScaleTag: `[ScaleX, ScaleY, ScaleZ]`.
pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;

/// A 2-D grid of elevation samples tied to geographic coordinates.
///
/// Copernicus 30 m tiles are 3600 x 3600 pixels covering one degree of
/// latitude and longitude, with the tie point at the north-west corner.
#[derive(Debug, Clone)]
pub struct GeoRaster {
    /// Elevation data in row-major order (north to south, west to east).
    data: Vec<f32>,
    /// Width of the raster in pixels.
    width: u32,
    /// Height of the raster in pixels.
    height: u32,
    /// Longitude of the top-left corner in degrees.
    origin_lon: f64,
    /// Latitude of the top-left corner in degrees.
    origin_lat: f64,
    /// Degrees of longitude per pixel (positive).
    pixel_width: f64,
    /// Degrees of latitude per pixel (negative for north-up).
    pixel_height: f64,
}

/// Geographic bounds of a raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Minimum longitude (west edge).
    pub min_lon: f64,
    /// Maximum longitude (east edge).
    pub max_lon: f64,
}

impl TileBounds {
    /// Check if a coordinate is within the bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

impl GeoRaster {
    /// Build a raster from samples already in memory.
    ///
    /// `origin_lon`/`origin_lat` locate the top-left corner; `pixel_height`
    /// is negative when rows run southward.
    pub fn new(
        data: Vec<f32>,
        width: u32,
        height: u32,
        origin_lon: f64,
        origin_lat: f64,
        pixel_width: f64,
        pixel_height: f64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DemError::EmptyRaster { width, height });
        }

        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(DemError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            origin_lon,
            origin_lat,
            pixel_width,
            pixel_height,
        })
    }

    /// Load a raster from a GeoTIFF file.
    ///
    /// Georeferencing comes from the ModelTiepoint and ModelPixelScale tags;
    /// a file without them is rejected rather than guessed at.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut decoder = Decoder::new(file)?;

        // A 3600 x 3600 f32 tile is ~52 MB, above the decoder's default limits
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.intermediate_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.ifd_value_size = 1024 * 1024 * 1024;
        decoder = decoder.with_limits(limits);

        let (width, height) = decoder.dimensions()?;
        let (origin_lon, origin_lat, pixel_width, pixel_height) =
            Self::read_georeference(&mut decoder, path)?;
        let data = Self::decode_elevation_data(&mut decoder)?;

        let raster = Self::new(
            data,
            width,
            height,
            origin_lon,
            origin_lat,
            pixel_width,
            pixel_height,
        )?;

        let (min, max) = raster.elevation_range();
        tracing::debug!(
            "{}: {}x{}, origin=({:.4}, {:.4}), pixel=({:.6}, {:.6}), elev range: {:.1} to {:.1}m",
            path.display(),
            width,
            height,
            origin_lon,
            origin_lat,
            pixel_width,
            pixel_height,
            min,
            max
        );

        Ok(raster)
    }

    /// Read origin and pixel size from the GeoTIFF tags.
    ///
    /// Returns `(origin_lon, origin_lat, pixel_width, pixel_height)` with the
    /// pixel height negated so rows run southward.
    fn read_georeference<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
        path: &Path,
    ) -> Result<(f64, f64, f64, f64)> {
        let invalid = |reason: &str| DemError::InvalidGeoTiff {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let tiepoint = decoder
            .get_tag_f64_vec(Tag::ModelTiepointTag)
            .map_err(|_| invalid("missing ModelTiepointTag (33922)"))?;
        let scale = decoder
            .get_tag_f64_vec(Tag::ModelPixelScaleTag)
            .map_err(|_| invalid("missing ModelPixelScaleTag (33550)"))?;

        if tiepoint.len() < 6 {
            return Err(invalid("ModelTiepointTag needs 6 values"));
        }
        if scale.len() < 2 {
            return Err(invalid("ModelPixelScaleTag needs at least 2 values"));
        }

        // Tiepoint (I, J) = (0, 0) maps to the top-left corner (X, Y)
        Ok((tiepoint[3], tiepoint[4], scale[0], -scale[1]))
    }

    /// Decode elevation data from the TIFF decoder.
    fn decode_elevation_data<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
    ) -> Result<Vec<f32>> {
        let result = decoder.read_image()?;

        match result {
            DecodingResult::F32(data) => Ok(data),
            DecodingResult::F64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I16(data) => Ok(data.into_iter().map(f32::from).collect()),
            DecodingResult::I32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U16(data) => Ok(data.into_iter().map(f32::from).collect()),
            DecodingResult::U32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U8(data) => Ok(data.into_iter().map(f32::from).collect()),
            DecodingResult::I8(data) => Ok(data.into_iter().map(f32::from).collect()),
            DecodingResult::U64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        }
    }

    /// Sample the elevation at a geographic coordinate.
    ///
    /// Uses bilinear interpolation between the four surrounding pixels. Each
    /// corner index is clamped to the raster independently, so queries on or
    /// beyond an edge repeat the edge samples instead of extrapolating. Any
    /// finite coordinate yields a finite value.
    ///
    /// # Arguments
    /// * `lat` - Latitude in decimal degrees (positive = north)
    /// * `lon` - Longitude in decimal degrees (negative = west)
    pub fn sample_bilinear(&self, lat: f64, lon: f64) -> f64 {
        let col = (lon - self.origin_lon) / self.pixel_width;
        let row = (lat - self.origin_lat) / self.pixel_height;

        let col_floor = col.floor();
        let row_floor = row.floor();
        let u = col - col_floor;
        let v = row - row_floor;

        let x0 = Self::clamp_index(col_floor, self.width);
        let x1 = Self::clamp_index(col_floor + 1.0, self.width);
        let y0 = Self::clamp_index(row_floor, self.height);
        let y1 = Self::clamp_index(row_floor + 1.0, self.height);

        let v00 = self.pixel(x0, y0);
        let v10 = self.pixel(x1, y0);
        let v01 = self.pixel(x0, y1);
        let v11 = self.pixel(x1, y1);

        v00 * (1.0 - u) * (1.0 - v) + v10 * u * (1.0 - v) + v01 * (1.0 - u) * v + v11 * u * v
    }

    /// Clamp a (possibly negative or huge) floored position to `[0, len - 1]`.
    fn clamp_index(position: f64, len: u32) -> u32 {
        // Float-to-int casts saturate, so out-of-range positions pin to an edge
        (position as i64).clamp(0, i64::from(len) - 1) as u32
    }

    /// Raw sample at a pixel coordinate.
    fn pixel(&self, x: u32, y: u32) -> f64 {
        let idx = y as usize * self.width as usize + x as usize;
        f64::from(self.data[idx])
    }

    /// Get the geographic bounds of this raster.
    pub fn extent(&self) -> TileBounds {
        let far_lon = self.origin_lon + self.width as f64 * self.pixel_width;
        let far_lat = self.origin_lat + self.height as f64 * self.pixel_height;

        TileBounds {
            min_lat: self.origin_lat.min(far_lat),
            max_lat: self.origin_lat.max(far_lat),
            min_lon: self.origin_lon.min(far_lon),
            max_lon: self.origin_lon.max(far_lon),
        }
    }

    /// Lowest and highest sample values.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
    }

    /// Get the dimensions of this raster in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Longitude and latitude of the top-left corner.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lon, self.origin_lat)
    }

    /// Degrees per pixel as `(width, height)`; height is negative for north-up.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.pixel_width, self.pixel_height)
    }
}
