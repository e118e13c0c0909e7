//! Configuration loading from ampstat.toml
//!
//! AmpStat configuration can be specified in an `ampstat.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use ampstat_report::OutputFormat;
use ampstat_stats::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SIGNIFICANCE_LEVEL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the discovered configuration file
pub const CONFIG_FILE_NAME: &str = "ampstat.toml";

/// AmpStat configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AmpConfig {
    /// Statistical settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Statistical settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Confidence level for Wilson intervals (e.g., 0.95 for 95%)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Threshold below which a McNemar p-value is reported as significant
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: default_confidence_level(),
            significance_level: default_significance_level(),
        }
    }
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}
fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places in human-readable output
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            precision: default_precision(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_precision() -> usize {
    2
}

/// Effective settings after applying CLI overrides to the file configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Output format
    pub format: OutputFormat,
    /// Wilson interval confidence level
    pub confidence_level: f64,
    /// McNemar significance threshold
    pub significance_level: f64,
    /// Decimal places in human output
    pub precision: usize,
}

impl AmpConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable configuration"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolve effective settings; CLI values win over the file
    pub fn resolve(
        &self,
        format: Option<&str>,
        confidence_level: Option<f64>,
        significance_level: Option<f64>,
    ) -> anyhow::Result<Settings> {
        let format_str = format.unwrap_or(self.output.format.as_str());
        let format: OutputFormat = format_str.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        let confidence_level = confidence_level.unwrap_or(self.analysis.confidence_level);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(anyhow::anyhow!(
                "Invalid confidence level: {} (must be between 0 and 1)",
                confidence_level
            ));
        }

        let significance_level = significance_level.unwrap_or(self.analysis.significance_level);
        if !(significance_level > 0.0 && significance_level < 1.0) {
            return Err(anyhow::anyhow!(
                "Invalid significance level: {} (must be between 0 and 1)",
                significance_level
            ));
        }

        Ok(Settings {
            format,
            confidence_level,
            significance_level,
            precision: self.output.precision,
        })
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# AmpStat Configuration

[analysis]
# Confidence level for Wilson score intervals (0.0 to 1.0)
confidence_level = 0.95
# McNemar p-values below this are reported as significant
significance_level = 0.05

[output]
# Default output format: human, json, csv
format = "human"
# Decimal places in human-readable output
precision = 2
"#
        .to_string()
    }
}
