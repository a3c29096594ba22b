//! Top-level tabsieve configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ContaminationConfig, CoverageConfig, DensityConfig};
use crate::constants;
use crate::errors::ConfigError;
use crate::types::{CenterMeasure, ContaminationMode, IdentifyBy, SpreadEstimator};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "tabsieve.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TABSIEVE_*`)
/// 3. Project config (`tabsieve.toml` in project root)
/// 4. User config (`~/.tabsieve/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TabsieveConfig {
    pub contamination: ContaminationConfig,
    pub density: DensityConfig,
    pub coverage: CoverageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub center_measure: Option<String>,
    pub neighbors_fraction: Option<f64>,
    pub contamination_mode: Option<String>,
    pub identify_by: Option<String>,
}

impl TabsieveConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. An unreadable file is skipped, a
        // malformed one is fatal.
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) | Err(ConfigError::FileNotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TabsieveConfig) -> Result<(), ConfigError> {
        let c = &config.contamination;
        if let Some(ref v) = c.center_measure {
            parse_field::<CenterMeasure>("contamination.center_measure", v)?;
        }
        if let Some(ref v) = c.spread_estimator {
            parse_field::<SpreadEstimator>("contamination.spread_estimator", v)?;
        }
        if let Some(ref v) = c.rule {
            one_of("contamination.rule", v, constants::EXCEEDANCE_RULES)?;
        }
        if let Some(m) = c.sigma_multiplier {
            positive("contamination.sigma_multiplier", m)?;
        }
        if let Some(m) = c.tukey_multiplier {
            positive("contamination.tukey_multiplier", m)?;
        }

        let d = &config.density;
        if let Some(f) = d.neighbors_fraction {
            unit_fraction("density.neighbors_fraction", f)?;
        }
        if let Some(ref v) = d.contamination_mode {
            parse_field::<ContaminationMode>("density.contamination_mode", v)?;
        }
        if let Some(ref v) = d.auto_cutoff {
            one_of("density.auto_cutoff", v, constants::AUTO_CUTOFFS)?;
        }
        if let Some(t) = d.auto_threshold {
            positive("density.auto_threshold", t)?;
        }
        if let Some(p) = d.auto_proportion {
            unit_fraction("density.auto_proportion", p)?;
        }
        if let Some(ref v) = d.metric {
            one_of("density.metric", v, constants::DISTANCE_METRICS)?;
        }

        let cov = &config.coverage;
        if let Some(ref v) = cov.rule {
            one_of("coverage.rule", v, constants::COVERAGE_RULES)?;
        }
        if let Some(days) = cov.min_days_per_month {
            if !(1..=31).contains(&days) {
                return Err(ConfigError::ValidationFailed {
                    field: "coverage.min_days_per_month".to_string(),
                    message: "must be between 1 and 31".to_string(),
                });
            }
        }
        if let Some(days) = cov.days_per_year {
            if !(1..=366).contains(&days) {
                return Err(ConfigError::ValidationFailed {
                    field: "coverage.days_per_year".to_string(),
                    message: "must be between 1 and 366".to_string(),
                });
            }
        }
        if let Some(days) = cov.days_per_month {
            positive("coverage.days_per_month", days)?;
        }
        if let Some(ref v) = cov.identify_by {
            parse_field::<IdentifyBy>("coverage.identify_by", v)?;
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut TabsieveConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TabsieveConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut TabsieveConfig, other: &TabsieveConfig) {
        // Contamination
        let (b, o) = (&mut base.contamination, &other.contamination);
        if o.center_measure.is_some() {
            b.center_measure = o.center_measure.clone();
        }
        if o.spread_estimator.is_some() {
            b.spread_estimator = o.spread_estimator.clone();
        }
        if o.rule.is_some() {
            b.rule = o.rule.clone();
        }
        if o.sigma_multiplier.is_some() {
            b.sigma_multiplier = o.sigma_multiplier;
        }
        if o.tukey_multiplier.is_some() {
            b.tukey_multiplier = o.tukey_multiplier;
        }

        // Density
        let (b, o) = (&mut base.density, &other.density);
        if o.neighbors_fraction.is_some() {
            b.neighbors_fraction = o.neighbors_fraction;
        }
        if o.contamination_mode.is_some() {
            b.contamination_mode = o.contamination_mode.clone();
        }
        if o.auto_cutoff.is_some() {
            b.auto_cutoff = o.auto_cutoff.clone();
        }
        if o.auto_threshold.is_some() {
            b.auto_threshold = o.auto_threshold;
        }
        if o.auto_proportion.is_some() {
            b.auto_proportion = o.auto_proportion;
        }
        if o.metric.is_some() {
            b.metric = o.metric.clone();
        }

        // Coverage
        let (b, o) = (&mut base.coverage, &other.coverage);
        if o.rule.is_some() {
            b.rule = o.rule.clone();
        }
        if o.min_days_per_month.is_some() {
            b.min_days_per_month = o.min_days_per_month;
        }
        if o.days_per_year.is_some() {
            b.days_per_year = o.days_per_year;
        }
        if o.days_per_month.is_some() {
            b.days_per_month = o.days_per_month;
        }
        if o.identify_by.is_some() {
            b.identify_by = o.identify_by.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `TABSIEVE_NEIGHBORS_FRACTION`, `TABSIEVE_CONTAMINATION_MODE`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut TabsieveConfig) {
        if let Ok(val) = std::env::var("TABSIEVE_CENTER_MEASURE") {
            config.contamination.center_measure = Some(val);
        }
        if let Ok(val) = std::env::var("TABSIEVE_SPREAD_ESTIMATOR") {
            config.contamination.spread_estimator = Some(val);
        }
        if let Ok(val) = std::env::var("TABSIEVE_NEIGHBORS_FRACTION") {
            if let Ok(v) = val.parse::<f64>() {
                config.density.neighbors_fraction = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TABSIEVE_CONTAMINATION_MODE") {
            config.density.contamination_mode = Some(val);
        }
        if let Ok(val) = std::env::var("TABSIEVE_MIN_DAYS_PER_MONTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.coverage.min_days_per_month = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TABSIEVE_IDENTIFY_BY") {
            config.coverage.identify_by = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TabsieveConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.center_measure {
            config.contamination.center_measure = Some(v.clone());
        }
        if let Some(v) = cli.neighbors_fraction {
            config.density.neighbors_fraction = Some(v);
        }
        if let Some(ref v) = cli.contamination_mode {
            config.density.contamination_mode = Some(v.clone());
        }
        if let Some(ref v) = cli.identify_by {
            config.coverage.identify_by = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_field<T>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::ValidationFailed {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    let normalized = value.trim().to_ascii_lowercase();
    if allowed.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("expected one of {allowed:?}, got '{value}'"),
        })
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a finite value greater than 0".to_string(),
        })
    }
}

fn unit_fraction(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be in (0.0, 1.0]".to_string(),
        })
    }
}

/// Returns the user config path: `~/.tabsieve/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".tabsieve").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
