//! Build configuration.
//!
//! Every field has a default reproducing the London Underground terrain
//! build, so an empty YAML file (or no file at all) is a valid configuration.
//!
//! ```yaml
//! grid:
//!   bounds: { min_e: 490000, min_n: 155000, max_e: 560000, max_n: 205000 }
//!   pixel_size_m: 50
//! tiles:
//!   source_dir: data/sources/copernicus_dem_30m
//! output:
//!   dir: public/data/terrain
//! ```

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Grid
// ============================================================================

/// Projected-grid extent in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Western edge (minimum easting).
    pub min_e: f64,
    /// Southern edge (minimum northing).
    pub min_n: f64,
    /// Eastern edge (maximum easting).
    pub max_e: f64,
    /// Northern edge (maximum northing).
    pub max_n: f64,
}

impl GridBounds {
    /// Bounds as `[min_e, min_n, max_e, max_n]`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.min_e, self.min_n, self.max_e, self.max_n]
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        GridBounds {
            min_e: 490_000.0,
            min_n: 155_000.0,
            max_e: 560_000.0,
            max_n: 205_000.0,
        }
    }
}

/// Output grid definition and descriptive strings for the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Extent of the output grid on the projected grid.
    pub bounds: GridBounds,
    /// Ground resolution in metres per pixel.
    pub pixel_size_m: f64,
    /// Coordinate reference system identifier of the output grid.
    pub crs: String,
    /// Free-text description of the data source.
    pub source: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            bounds: GridBounds::default(),
            pixel_size_m: 50.0,
            crs: "EPSG:27700".to_string(),
            source: "Copernicus DEM 30m (DSM), resampled to 50m BNG grid".to_string(),
        }
    }
}

// ============================================================================
// Inputs and outputs
// ============================================================================

/// Location of the two source tiles either side of the 0° meridian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Directory holding the tiles.
    pub source_dir: PathBuf,
    /// Tile covering longitudes west of 0°.
    pub west: String,
    /// Tile covering longitudes east of 0°.
    pub east: String,
}

impl TileConfig {
    pub fn west_path(&self) -> PathBuf {
        self.source_dir.join(&self.west)
    }

    pub fn east_path(&self) -> PathBuf {
        self.source_dir.join(&self.east)
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            source_dir: PathBuf::from("data/sources/copernicus_dem_30m"),
            west: "Copernicus_DSM_COG_10_N51_00_W001_00_DEM.tif".to_string(),
            east: "Copernicus_DSM_COG_10_N51_00_E000_00_DEM.tif".to_string(),
        }
    }
}

/// Where the heightmap and its metadata are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created if missing.
    pub dir: PathBuf,
    /// 16-bit PNG filename.
    pub heightmap: String,
    /// JSON metadata filename.
    pub metadata: String,
}

impl OutputConfig {
    pub fn heightmap_path(&self) -> PathBuf {
        self.dir.join(&self.heightmap)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.metadata)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("public/data/terrain"),
            heightmap: "london_full_height_u16.png".to_string(),
            metadata: "london_full_height.json".to_string(),
        }
    }
}

// ============================================================================
// Landmarks
// ============================================================================

/// A named grid position whose elevation is reported after resampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Display name.
    pub name: String,
    /// Easting in metres.
    pub easting: f64,
    /// Northing in metres.
    pub northing: f64,
    /// Human-readable expectation, e.g. "~15m".
    pub expected: String,
}

impl Landmark {
    pub fn new(name: &str, easting: f64, northing: f64, expected: &str) -> Self {
        Landmark {
            name: name.to_string(),
            easting,
            northing,
            expected: expected.to_string(),
        }
    }
}

/// Well-known London spot heights used as a sanity check of the output.
pub fn default_landmarks() -> Vec<Landmark> {
    vec![
        Landmark::new("Westminster (Thames)", 530_250.0, 179_650.0, "~0-5m"),
        Landmark::new("Trafalgar Square", 530_050.0, 180_550.0, "~15m"),
        Landmark::new("Hampstead Heath", 526_500.0, 186_500.0, "~80-120m"),
        Landmark::new("Crystal Palace", 534_000.0, 170_500.0, "~100-112m"),
    ]
}

// ============================================================================
// Build configuration
// ============================================================================

/// Complete configuration of a heightmap build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub grid: GridConfig,
    pub tiles: TileConfig,
    pub output: OutputConfig,
    pub landmarks: Vec<Landmark>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            grid: GridConfig::default(),
            tiles: TileConfig::default(),
            output: OutputConfig::default(),
            landmarks: default_landmarks(),
        }
    }
}

impl BuildConfig {
    /// Parse a configuration from YAML; missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, BuildError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();

        assert_eq!(config.grid.bounds.as_array(), [490_000.0, 155_000.0, 560_000.0, 205_000.0]);
        assert_eq!(config.grid.pixel_size_m, 50.0);
        assert_eq!(config.grid.crs, "EPSG:27700");
        assert_eq!(config.landmarks.len(), 4);
        assert_eq!(
            config.tiles.west_path(),
            Path::new("data/sources/copernicus_dem_30m/Copernicus_DSM_COG_10_N51_00_W001_00_DEM.tif")
        );
        assert_eq!(
            config.output.metadata_path(),
            Path::new("public/data/terrain/london_full_height.json")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
grid:
  pixel_size_m: 100
output:
  dir: /tmp/terrain
landmarks: []
"#;
        let config = BuildConfig::from_yaml(yaml).expect("valid yaml");

        assert_eq!(config.grid.pixel_size_m, 100.0);
        assert_eq!(config.grid.bounds, GridBounds::default());
        assert_eq!(config.output.dir, PathBuf::from("/tmp/terrain"));
        assert_eq!(config.output.heightmap, "london_full_height_u16.png");
        assert_eq!(config.tiles, TileConfig::default());
        assert!(config.landmarks.is_empty());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        // serde_yaml treats an empty document as unit, so use an empty mapping
        let config = BuildConfig::from_yaml("{}").expect("valid yaml");
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = BuildConfig::from_yaml("grid: [1, 2").unwrap_err();
        assert!(matches!(err, BuildError::Yaml(_)));
    }
}
