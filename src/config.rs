//! Configuration management for Shelfmark

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Rendering policy for US grade-level audience ranges with a missing side.
/// Both behaviors exist in the wild; the choice is configuration, not a
/// hardcoded pick.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GradeRangeStyle {
    /// Omit the field unless at least one side of the range is present;
    /// a missing side renders as `Unknown`.
    #[default]
    OmitWhenEmpty,
    /// Emit the field whenever a grade-level range entry exists, rendering
    /// each missing side as `Unknown`.
    PlaceholderSides,
}

/// Knobs for the ONIX extraction path.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OnixOptions {
    pub grade_range: GradeRangeStyle,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub onix: OnixOptions,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix SHELFMARK_)
            .add_source(
                Environment::with_prefix("SHELFMARK")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_range_default() {
        let options = OnixOptions::default();
        assert_eq!(options.grade_range, GradeRangeStyle::OmitWhenEmpty);
    }
}
