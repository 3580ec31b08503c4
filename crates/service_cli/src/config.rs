//! Engine configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use valuation_core::types::{MultipleKind, ValuationError};
use valuation_engine::sensitivity::{ParallelConfig, SensitivityConfig, SensitivityGrid};
use valuation_engine::validation::RuleSet;
use valuation_engine::ValuationSettings;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid rule table: {0}")]
    InvalidRules(ValuationError),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Base-case valuation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationSection {
    /// Discount rate
    pub wacc: f64,
    /// Terminal growth rate
    pub terminal_growth: f64,
    /// Minimum projection length
    pub projection_years: usize,
    /// Multiple for the headline comparables value
    pub multiple: MultipleKind,
}

impl Default for ValuationSection {
    fn default() -> Self {
        Self {
            wacc: 0.10,
            terminal_growth: 0.02,
            projection_years: 5,
            multiple: MultipleKind::EvToEbitda,
        }
    }
}

/// Sensitivity grid shape and evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivitySection {
    /// Spacing of the WACC axis
    pub wacc_step: f64,
    /// Spacing of the growth axis
    pub growth_step: f64,
    /// Points on each side of the base case
    pub steps_each_side: usize,
    /// Cell count from which the grid is evaluated with rayon
    pub parallel_threshold: usize,
    /// Report cells with `wacc <= g` as undefined
    pub strict_terminal_growth: bool,
}

impl Default for SensitivitySection {
    fn default() -> Self {
        Self {
            wacc_step: 0.01,
            growth_step: 0.005,
            steps_each_side: 2,
            parallel_threshold: ParallelConfig::default().parallel_threshold,
            strict_terminal_growth: true,
        }
    }
}

/// Engine configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Base-case parameters
    pub valuation: ValuationSection,
    /// Sensitivity grid
    pub sensitivity: SensitivitySection,
    /// Validation rule tables
    pub rules: RuleSet,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            valuation: ValuationSection::default(),
            sensitivity: SensitivitySection::default(),
            rules: RuleSet::default(),
        }
    }
}

const ENV_LOG_LEVEL: &str = "VALUER_LOG_LEVEL";
const ENV_WACC: &str = "VALUER_WACC";
const ENV_TERMINAL_GROWTH: &str = "VALUER_TERMINAL_GROWTH";

fn env_rate(name: &str) -> Result<Option<f64>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError(format!("{} is not a number: {}", name, raw))),
        Err(_) => Ok(None),
    }
}

impl EngineConfig {
    /// Override the fields whose environment variable is set
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(log_level) = std::env::var(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Some(wacc) = env_rate(ENV_WACC)? {
            self.valuation.wacc = wacc;
        }
        if let Some(growth) = env_rate(ENV_TERMINAL_GROWTH)? {
            self.valuation.terminal_growth = growth;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.valuation;
        if !v.wacc.is_finite() {
            return Err(ConfigError::invalid("valuation.wacc", "must be finite"));
        }
        if !v.terminal_growth.is_finite() {
            return Err(ConfigError::invalid("valuation.terminal_growth", "must be finite"));
        }

        let s = &self.sensitivity;
        if !(s.wacc_step > 0.0 && s.wacc_step.is_finite()) {
            return Err(ConfigError::invalid("sensitivity.wacc_step", "must be positive"));
        }
        if !(s.growth_step > 0.0 && s.growth_step.is_finite()) {
            return Err(ConfigError::invalid("sensitivity.growth_step", "must be positive"));
        }

        self.rules.validate().map_err(ConfigError::InvalidRules)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(wacc) = cli.wacc {
            self.valuation.wacc = wacc;
        }
        if let Some(growth) = cli.terminal_growth {
            self.valuation.terminal_growth = growth;
        }
        if let Some(multiple) = &cli.multiple {
            self.valuation.multiple = MultipleKind::from_str(multiple)
                .map_err(|reason| ConfigError::invalid("multiple", reason))?;
        }
        Ok(())
    }

    /// Engine settings for this configuration.
    ///
    /// The sensitivity axes are centred on the configured base case.
    pub fn to_settings(&self) -> ValuationSettings {
        let v = &self.valuation;
        let s = &self.sensitivity;
        ValuationSettings {
            wacc: v.wacc,
            terminal_growth: v.terminal_growth,
            projection_years: v.projection_years,
            multiple: v.multiple,
            grid: SensitivityGrid::around(
                v.wacc,
                v.terminal_growth,
                s.wacc_step,
                s.growth_step,
                s.steps_each_side,
            ),
            sensitivity: SensitivityConfig {
                parallel: ParallelConfig {
                    parallel_threshold: s.parallel_threshold,
                    ..ParallelConfig::default()
                },
                strict_terminal_growth: s.strict_terminal_growth,
            },
            rules: self.rules.clone(),
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Discount rate override
    pub wacc: Option<f64>,
    /// Terminal growth override
    pub terminal_growth: Option<f64>,
    /// Headline multiple override
    pub multiple: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<EngineConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        EngineConfig::from_file(config_path)?
    } else {
        EngineConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.valuation.wacc, 0.10);
        assert_eq!(config.valuation.terminal_growth, 0.02);
        assert_eq!(config.valuation.projection_years, 5);
        assert_eq!(config.valuation.multiple, MultipleKind::EvToEbitda);
        assert_eq!(config.sensitivity.steps_each_side, 2);
        assert_eq!(config.sensitivity.parallel_threshold, 64);
        assert!(config.sensitivity.strict_terminal_growth);
        assert_eq!(config.rules, RuleSet::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Trace.to_string(), "trace");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            log_level = "debug"

            [valuation]
            wacc = 0.09
            terminal_growth = 0.025
            projection_years = 7
            multiple = "pe_ratio"

            [sensitivity]
            wacc_step = 0.005
            growth_step = 0.0025
            steps_each_side = 3
            parallel_threshold = 16
            strict_terminal_growth = false
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.valuation.wacc, 0.09);
        assert_eq!(config.valuation.projection_years, 7);
        assert_eq!(config.valuation.multiple, MultipleKind::PeRatio);
        assert_eq!(config.sensitivity.steps_each_side, 3);
        assert!(!config.sensitivity.strict_terminal_growth);
    }

    #[test]
    fn test_partial_toml_parsing() {
        let toml_str = r#"
            [valuation]
            wacc = 0.12
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.valuation.wacc, 0.12);
        // Other fields should have default values
        assert_eq!(config.valuation.terminal_growth, 0.02);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.sensitivity, SensitivitySection::default());
    }

    #[test]
    fn test_toml_rule_table_replaces_preset() {
        let toml_str = r#"
            [[rules.generic]]
            kind = "error"
            field = "ebitda"
            message = "EBITDA must be positive"
            comparator = "gt"
            threshold = 0.0
            severity = 3
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rules.generic.len(), 1);
        assert_eq!(config.rules.generic[0].field, "ebitda");
        assert_eq!(config.rules.industry, RuleSet::default().industry);
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        let result: Result<EngineConfig, _> = toml::from_str(r#"log_level = "loud""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        let mut config = EngineConfig::default();
        config.sensitivity.wacc_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "sensitivity.wacc_step"
        ));

        let mut config = EngineConfig::default();
        config.sensitivity.growth_step = -0.01;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.valuation.wacc = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut config = EngineConfig::default();
        let cli = CliArgs {
            log_level: Some("warn".to_string()),
            wacc: Some(0.08),
            terminal_growth: Some(0.015),
            multiple: Some("ev-ebit".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.valuation.wacc, 0.08);
        assert_eq!(config.valuation.terminal_growth, 0.015);
        assert_eq!(config.valuation.multiple, MultipleKind::EvToEbit);

        let bad = CliArgs {
            multiple: Some("ev_to_unicorns".to_string()),
            ..Default::default()
        };
        assert!(config.merge_with_cli(&bad).is_err());
    }

    #[test]
    fn test_settings_grid_centred_on_base_case() {
        let mut config = EngineConfig::default();
        config.valuation.wacc = 0.09;
        config.sensitivity.parallel_threshold = 8;
        let settings = config.to_settings();

        assert_eq!(settings.grid.wacc.len(), 5);
        assert_eq!(settings.grid.growth.len(), 5);
        assert_relative_eq!(settings.grid.wacc[2], 0.09, epsilon = 1e-12);
        assert_relative_eq!(settings.grid.wacc[0], 0.07, epsilon = 1e-12);
        assert_relative_eq!(settings.grid.growth[4], 0.03, epsilon = 1e-12);
        assert_eq!(settings.sensitivity.parallel.parallel_threshold, 8);
        assert!(settings.sensitivity.strict_terminal_growth);
    }

    #[test]
    fn test_build_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[valuation]\nwacc = 0.11\nprojection_years = 3").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            terminal_growth: Some(0.01),
            ..Default::default()
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.valuation.projection_years, 3);
        assert_eq!(config.valuation.terminal_growth, 0.01);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/valuer.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_config_renders_as_toml() {
        let rendered = toml::to_string(&EngineConfig::default()).unwrap();
        let parsed: EngineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, EngineConfig::default());
    }
}
