//! Configuration management for oiplot.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{OiplotError, Result};

/// Ocean regions with published comparison figures.
///
/// The display token of each variant is the region prefix embedded in the
/// reconstruction filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Subtropical North Atlantic study box
    Atl,
    /// Western Mediterranean study box
    Med,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Atl => write!(f, "Atl"),
            Region::Med => write!(f, "Med"),
        }
    }
}

impl FromStr for Region {
    type Err = OiplotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Atl" => Ok(Region::Atl),
            "Med" => Ok(Region::Med),
            _ => Err(OiplotError::InvalidParameter {
                param: "region".to_string(),
                message: format!("Unknown region: {}. Valid values are 'Atl' and 'Med'", s),
            }),
        }
    }
}

/// Source models whose reconstructions are compared.
///
/// The display token of each variant is the model token embedded in the
/// reconstruction filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// CMEMS global reanalysis
    Cmems,
    /// WMOP western Mediterranean operational model
    Wmop,
    /// eNATL60 North Atlantic simulation
    Enatl60,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Cmems => write!(f, "CMEMS"),
            Model::Wmop => write!(f, "WMOP"),
            Model::Enatl60 => write!(f, "eNATL60"),
        }
    }
}

impl FromStr for Model {
    type Err = OiplotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CMEMS" => Ok(Model::Cmems),
            "WMOP" => Ok(Model::Wmop),
            "eNATL60" => Ok(Model::Enatl60),
            _ => Err(OiplotError::InvalidParameter {
                param: "model".to_string(),
                message: format!(
                    "Unknown model: {}. Valid values are 'CMEMS', 'WMOP' and 'eNATL60'",
                    s
                ),
            }),
        }
    }
}

/// Command-line arguments for oiplot
#[derive(Parser, Debug)]
#[command(name = "oiplot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Region to plot (Atl or Med)
    pub region: String,

    /// Source model (CMEMS, WMOP or eNATL60)
    pub model: String,

    /// Directory holding the interpolated-field NetCDF triplets
    #[arg(short, long, env = "OIPLOT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory where the output figures are written
    #[arg(short, long, env = "OIPLOT_FIGURES_DIR")]
    pub figures_dir: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "OIPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "OIPLOT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Input/output directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the interpolated-field NetCDF triplets
    #[serde(default = "default_dir")]
    pub data_dir: PathBuf,

    /// Directory where the output figures are written
    #[serde(default = "default_dir")]
    pub figures_dir: PathBuf,

    /// Optional GeoJSON file with coastline polylines drawn on every panel
    #[serde(default)]
    pub coastline: Option<PathBuf>,
}

/// Complete configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Input/output directories
    pub paths: PathsConfig,

    /// Region to plot
    pub region: Region,

    /// Source model
    pub model: Model,

    /// Log level
    pub log_level: String,
}

/// The JSON-file view of the configuration (region and model come from the
/// command line only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    paths: Option<PathsConfig>,

    #[serde(default)]
    log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build a configuration from parsed arguments (separated from `load`
    /// so tests can drive it without touching the process argv).
    pub fn from_args(args: Args) -> Result<Self> {
        let region = args.region.parse::<Region>()?;
        let model = args.model.parse::<Model>()?;

        // Start with defaults
        let mut paths = PathsConfig::default();
        let mut log_level: Option<String> = None;

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let file_config = Self::load_from_file(config_path)?;
            if let Some(file_paths) = file_config.paths {
                paths = file_paths;
            }
            if let Some(level) = file_config.log_level {
                log_level = Some(level);
            }
        }

        // Command-line arguments take precedence
        if let Some(dir) = args.data_dir {
            paths.data_dir = dir;
        }
        if let Some(dir) = args.figures_dir {
            paths.figures_dir = dir;
        }
        if let Some(level) = args.log_level {
            log_level = Some(level);
        }

        Ok(Config {
            paths,
            region,
            model,
            log_level: log_level.unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<FileConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Besides the log level, this rejects (region, model) pairs that the
    /// contour-level calibration table does not define, so a bad pairing
    /// fails here, before any input file is opened.
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(OiplotError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if !crate::levels::is_calibrated(self.region, self.model) {
            return Err(OiplotError::Config {
                message: format!(
                    "No contour calibration exists for region {} with model {}",
                    self.region, self.model
                ),
            });
        }

        Ok(())
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_dir(),
            figures_dir: default_dir(),
            coastline: None,
        }
    }
}

// Default value functions for serde
fn default_dir() -> PathBuf {
    PathBuf::from(".")
}
