//! Writers for the heightmap PNG and its JSON metadata.

use crate::error::BuildError;
use crate::heightmap::QuantizedHeightmap;
use crate::metadata::HeightmapMetadata;
use image::{ImageBuffer, ImageFormat, Luma};
use std::path::Path;

/// Write a heightmap as a single-channel 16-bit PNG.
pub fn write_png(path: &Path, heightmap: &QuantizedHeightmap) -> Result<(), BuildError> {
    let (width, height) = (heightmap.width(), heightmap.height());
    let buffer_error = || BuildError::ImageBuffer {
        width,
        height,
        len: heightmap.pixels().len(),
    };

    let image: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(
        u32::try_from(width).map_err(|_| buffer_error())?,
        u32::try_from(height).map_err(|_| buffer_error())?,
        heightmap.pixels().to_vec(),
    )
    .ok_or_else(buffer_error)?;

    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write metadata as pretty-printed JSON.
pub fn write_metadata(path: &Path, metadata: &HeightmapMetadata) -> Result<(), BuildError> {
    let mut json = serde_json::to_string_pretty(metadata)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::ElevationGrid;

    #[test]
    fn test_png_is_16_bit_grayscale() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("height.png");

        let grid =
            ElevationGrid::new(3, 2, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]).expect("grid");
        let heightmap = QuantizedHeightmap::from_grid(&grid);
        write_png(&path, &heightmap).expect("write png");

        let decoded = image::open(&path).expect("read png");
        let luma = decoded.as_luma16().expect("16-bit grayscale");
        assert_eq!(luma.dimensions(), (3, 2));
        assert_eq!(luma.as_raw().as_slice(), heightmap.pixels());
    }

    #[test]
    fn test_metadata_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("height.json");

        let metadata = HeightmapMetadata {
            source: "test".to_string(),
            crs: "EPSG:27700".to_string(),
            bounds_m: [0.0, 0.0, 100.0, 50.0],
            width: 2,
            height: 1,
            pixel_size_m: 50.0,
            elev_min_m: 1.25,
            elev_max_m: 99.5,
            heightmap: "height.png".to_string(),
        };
        write_metadata(&path, &metadata).expect("write json");

        let text = std::fs::read_to_string(&path).expect("read json");
        let parsed: HeightmapMetadata = serde_json::from_str(&text).expect("parse json");
        assert_eq!(parsed, metadata);
    }
}
