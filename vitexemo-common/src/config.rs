//! Configuration loading and resolution
//!
//! Every pipeline binary runs with zero configuration; a TOML file only
//! overrides directories, the verifier tolerance and the log level.
//!
//! # Config file resolution priority
//! 1. Command-line `--config` argument (must exist)
//! 2. `VITEXEMO_CONFIG` environment variable (must exist)
//! 3. `./vitexemo.toml` in the working directory
//! 4. `<platform config dir>/vitexemo/config.toml`
//! 5. Compiled defaults
//!
//! Missing files at steps 3 and 4 are not errors; the loader falls through
//! to the compiled defaults. [`TomlConfig::source`] records which file (if
//! any) was used, and [`TomlConfig::log_source`] reports it once logging
//! is up.
//!
//! # Example
//! ```toml
//! [paths]
//! data_dir = "data"
//! results_dir = "results"
//! expected_dir = "expected_results"
//!
//! [verify]
//! tolerance = 0.5
//! exhaustive = false
//!
//! [logging]
//! level = "debug"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VITEXEMO_CONFIG";

/// Environment variable overriding the verifier tolerance
pub const TOLERANCE_ENV_VAR: &str = "VITEXEMO_TOLERANCE";

/// Default verifier tolerance, in percent points
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "vitexemo.toml";

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the configuration was read from; `None` for compiled defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Input and output directories
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathsConfig {
    /// Input data (text JSON, polarity CSV)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Predictions and metrics written by the pipeline
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Published baseline tables
    #[serde(default = "default_expected_dir")]
    pub expected_dir: PathBuf,
}

/// Reproducibility verifier settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifyConfig {
    /// Maximum allowed absolute deviation, in the table's percent units
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Report every failing column of every pair instead of stopping early
    #[serde(default)]
    pub exhaustive: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_expected_dir() -> PathBuf {
    PathBuf::from("expected_results")
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            results_dir: default_results_dir(),
            expected_dir: default_expected_dir(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            exhaustive: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PathsConfig {
    pub fn text_input(&self) -> PathBuf {
        self.data_dir.join("sample_texts.json")
    }

    pub fn preprocessed_texts(&self) -> PathBuf {
        self.data_dir.join("preprocessed_texts.csv")
    }

    pub fn text_predictions(&self) -> PathBuf {
        self.results_dir.join("text_predictions.csv")
    }

    pub fn textual_metrics(&self) -> PathBuf {
        self.results_dir.join("textual_metrics.csv")
    }

    pub fn image_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    pub fn visual_metrics(&self) -> PathBuf {
        self.results_dir.join("visual_metrics.csv")
    }

    pub fn visual_predictions(&self) -> PathBuf {
        self.results_dir.join("visual_predictions.csv")
    }

    pub fn fused_predictions(&self) -> PathBuf {
        self.results_dir.join("fused_predictions.csv")
    }

    pub fn overall_metrics(&self) -> PathBuf {
        self.results_dir.join("overall_metrics.csv")
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        validate_tolerance(config.verify.tolerance)?;
        Ok(config)
    }

    /// Load configuration from a file that must exist
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Log where the configuration came from
    ///
    /// Configuration is loaded before the tracing subscriber exists (the
    /// log level lives in it), so binaries call this right after
    /// `init_tracing`.
    pub fn log_source(&self) {
        match &self.source {
            Some(path) => info!("Loaded configuration from {}", path.display()),
            None => warn!("No configuration file found, using built-in defaults"),
        }
    }
}

/// Implicit config file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("vitexemo").join("config.toml"));
    }
    locations
}

/// Resolve and load the configuration
///
/// See the module documentation for the priority order.
pub fn load_config(cli_path: Option<&Path>) -> Result<TomlConfig> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_path {
        return TomlConfig::load_file(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return TomlConfig::load_file(Path::new(&path));
    }

    // Priority 3 and 4: implicit locations
    if let Some(candidate) = default_config_locations().into_iter().find(|c| c.is_file()) {
        return TomlConfig::load_file(&candidate);
    }

    // Priority 5: Compiled defaults
    Ok(TomlConfig::default())
}

/// Reject tolerances that would make every comparison meaningless
pub fn validate_tolerance(tolerance: f64) -> Result<f64> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(tolerance)
    } else {
        Err(Error::Config(format!(
            "tolerance must be a finite non-negative number, got {}",
            tolerance
        )))
    }
}

/// Resolve the verifier tolerance: CLI, then environment, then config file
pub fn resolve_tolerance(cli_value: Option<f64>, config: &TomlConfig) -> Result<f64> {
    if let Some(tolerance) = cli_value {
        return validate_tolerance(tolerance);
    }

    if let Ok(raw) = std::env::var(TOLERANCE_ENV_VAR) {
        let tolerance = raw.trim().parse::<f64>().map_err(|_| {
            Error::Config(format!("{} is not a number: '{}'", TOLERANCE_ENV_VAR, raw))
        })?;
        return validate_tolerance(tolerance);
    }

    validate_tolerance(config.verify.tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.verify.tolerance, 0.5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = TomlConfig::from_toml_str(
            "[paths]\nresults_dir = \"out\"\n\n[verify]\nexhaustive = true\n",
        )
        .unwrap();
        assert_eq!(config.paths.results_dir, PathBuf::from("out"));
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert!(config.verify.exhaustive);
        assert_eq!(config.verify.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let err = TomlConfig::from_toml_str("[verify]\ntolerance = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[paths\nresults_dir = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_artifact_paths_join_directories() {
        let paths = PathsConfig::default();
        assert_eq!(paths.textual_metrics(), PathBuf::from("results/textual_metrics.csv"));
        assert_eq!(paths.text_input(), PathBuf::from("data/sample_texts.json"));
        assert_eq!(paths.fused_predictions(), PathBuf::from("results/fused_predictions.csv"));
    }

    #[test]
    fn test_validate_tolerance_accepts_zero() {
        assert_eq!(validate_tolerance(0.0).unwrap(), 0.0);
        assert!(validate_tolerance(f64::NAN).is_err());
        assert!(validate_tolerance(f64::INFINITY).is_err());
    }
}
