//! Configuration management for gridder.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GridError, Result};
use crate::geometry::GridGeometry;
use crate::grid::ContextOptions;
use crate::options::AlgorithmParameters;
use crate::output::OutputType;

/// Command-line arguments for gridder
#[derive(Parser, Debug)]
#[command(name = "gridder")]
#[command(author, version, about = "Interpolate scattered points onto a regular grid", long_about = None)]
pub struct Args {
    /// Path to the JSON point file
    pub points_file: PathBuf,

    /// Algorithm with options, e.g. "invdist:power=3:smoothing=1"
    #[arg(short, long, env = "GRIDDER_ALGORITHM")]
    pub algorithm: Option<String>,

    /// Grid extent: XMIN XMAX YMIN YMAX (defaults to the extent of the points)
    #[arg(short, long, num_args = 4, value_names = ["XMIN", "XMAX", "YMIN", "YMAX"], allow_negative_numbers = true)]
    pub extent: Option<Vec<f64>>,

    /// Grid size: COLUMNS ROWS
    #[arg(short, long, num_args = 2, value_names = ["COLUMNS", "ROWS"])]
    pub size: Option<Vec<usize>>,

    /// Output element type (byte, uint16, int16, uint32, int32, float32, float64)
    #[arg(short = 't', long, env = "GRIDDER_OUTPUT_TYPE")]
    pub output_type: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long, env = "GRIDDER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of worker threads (0 = all cores)
    #[arg(short = 'j', long, env = "GRIDDER_THREADS")]
    pub threads: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "GRIDDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GRIDDER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Output grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Algorithm option string
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Output element type
    #[serde(default = "default_output_type")]
    pub output_type: String,

    #[serde(default = "default_size")]
    pub columns: usize,

    #[serde(default = "default_size")]
    pub rows: usize,

    /// `[x_min, x_max, y_min, y_max]`; the point extent when absent
    #[serde(default)]
    pub extent: Option<[f64; 4]>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,

    /// Engine tuning
    #[serde(default)]
    pub engine: ContextOptions,

    /// Where to write the grid document
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from parsed arguments. Returns it with the
    /// point file path.
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(algorithm) = args.algorithm {
            config.grid.algorithm = algorithm;
        }
        if let Some(extent) = args.extent {
            let [x_min, x_max, y_min, y_max] = <[f64; 4]>::try_from(extent).map_err(|v| {
                GridError::Config {
                    message: format!("Extent needs 4 values, got {}", v.len()),
                }
            })?;
            config.grid.extent = Some([x_min, x_max, y_min, y_max]);
        }
        if let Some(size) = args.size {
            let [columns, rows] = <[usize; 2]>::try_from(size).map_err(|v| GridError::Config {
                message: format!("Size needs 2 values, got {}", v.len()),
            })?;
            config.grid.columns = columns;
            config.grid.rows = rows;
        }
        if let Some(output_type) = args.output_type {
            config.grid.output_type = output_type;
        }
        if args.output.is_some() {
            config.output = args.output;
        }
        if let Some(threads) = args.threads {
            config.engine.threads = threads;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.points_file))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.grid = other.grid;
        self.engine = other.engine;
        if other.output.is_some() {
            self.output = other.output;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GridError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        self.parameters()?;
        self.output_type()?;

        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(GridError::Config {
                message: format!(
                    "Grid size must be non-zero, got {} x {}",
                    self.grid.columns, self.grid.rows
                ),
            });
        }

        if let Some([x_min, x_max, y_min, y_max]) = self.grid.extent {
            if !(x_min < x_max && y_min < y_max) {
                return Err(GridError::Config {
                    message: format!(
                        "Invalid extent: x = [{}, {}], y = [{}, {}]",
                        x_min, x_max, y_min, y_max
                    ),
                });
            }
        }

        if self.engine.threads > 128 {
            return Err(GridError::Config {
                message: format!("Too many threads: {}. At most 128", self.engine.threads),
            });
        }

        Ok(())
    }

    /// The parsed and checked algorithm parameters
    pub fn parameters(&self) -> Result<AlgorithmParameters> {
        let parameters: AlgorithmParameters =
            self.grid.algorithm.parse().map_err(|e: GridError| GridError::Config {
                message: format!("Invalid algorithm \"{}\": {}", self.grid.algorithm, e),
            })?;
        parameters.validate().map_err(|e| GridError::Config {
            message: format!("Invalid algorithm \"{}\": {}", self.grid.algorithm, e),
        })?;
        Ok(parameters)
    }

    pub fn output_type(&self) -> Result<OutputType> {
        self.grid.output_type.parse().map_err(|e: GridError| GridError::Config {
            message: e.to_string(),
        })
    }

    /// Output geometry, falling back to the extent of the points
    pub fn geometry(&self, point_extent: Option<(f64, f64, f64, f64)>) -> Result<GridGeometry> {
        let [x_min, x_max, y_min, y_max] = match (self.grid.extent, point_extent) {
            (Some(extent), _) => extent,
            (None, Some((min_x, min_y, max_x, max_y))) => [min_x, max_x, min_y, max_y],
            (None, None) => {
                return Err(GridError::Config {
                    message: "No extent given and no points to derive it from".to_string(),
                })
            }
        };
        let geometry = GridGeometry::new(x_min, x_max, y_min, y_max, self.grid.columns, self.grid.rows);
        geometry.validate()?;
        Ok(geometry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            engine: ContextOptions::default(),
            output: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            output_type: default_output_type(),
            columns: default_size(),
            rows: default_size(),
            extent: None,
        }
    }
}

// Default value functions for serde
fn default_algorithm() -> String {
    "invdist".to_string()
}

fn default_output_type() -> String {
    "float64".to_string()
}

fn default_size() -> usize {
    256
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grid.algorithm, "invdist");
        assert_eq!(config.grid.output_type, "float64");
        assert_eq!((config.grid.columns, config.grid.rows), (256, 256));
        assert_eq!(config.engine, ContextOptions::default());
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.grid.algorithm = "nearest".to_string();
        config2.engine.threads = 4;

        config1.merge(config2);

        assert_eq!(config1.grid.algorithm, "nearest");
        assert_eq!(config1.engine.threads, 4);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.algorithm = "kriging".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.output_type = "complex64".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.rows = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.extent = Some([1.0, 0.0, 0.0, 1.0]);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.engine.threads = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_layering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"grid": {{"algorithm": "average:radius1=2:radius2=2", "columns": 10, "rows": 20}},
                "engine": {{"threads": 2}}, "log_level": "debug"}}"#
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let args = Args::parse_from([
            "gridder",
            "points.json",
            "--config",
            &config_path,
            "--size",
            "30",
            "40",
            "--extent",
            "-1",
            "1",
            "-2",
            "2",
        ]);
        let (config, points) = Config::from_args(args).unwrap();
        assert_eq!(points, PathBuf::from("points.json"));
        assert_eq!(config.grid.algorithm, "average:radius1=2:radius2=2");
        assert_eq!((config.grid.columns, config.grid.rows), (30, 40));
        assert_eq!(config.grid.extent, Some([-1.0, 1.0, -2.0, 2.0]));
        assert_eq!(config.engine.threads, 2);
        assert_eq!(config.engine.point_count_threshold, 100);
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());

        let geometry = config.geometry(None).unwrap();
        assert_eq!(geometry.dx(), 2.0 / 30.0);
    }

    #[test]
    fn test_geometry_from_points() {
        let config = Config::default();
        let geometry = config.geometry(Some((0.0, 1.0, 10.0, 5.0))).unwrap();
        assert_eq!(
            (geometry.x_min, geometry.x_max, geometry.y_min, geometry.y_max),
            (0.0, 10.0, 1.0, 5.0)
        );
        assert!(config.geometry(None).is_err());
        assert!(config.geometry(Some((2.0, 2.0, 2.0, 2.0))).is_err());
    }
}
