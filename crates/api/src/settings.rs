//! Service configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `CARPRICE_*` environment variables
//! (e.g. `CARPRICE_ARTIFACTS__MODEL_PATH`).

use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "car-price";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CARPRICE";

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub artifacts: ArtifactSettings,
    /// Fixed reference year for car age; the local calendar year when unset
    pub current_year: Option<i32>,
    pub validation: ValidationSettings,
    pub logging: LogSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    /// Expose Prometheus metrics on `/metrics`
    pub metrics: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            metrics: true,
        }
    }
}

/// Model and schema artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// `.json` linear model or `.onnx` graph
    pub model_path: String,
    /// JSON array of column names
    pub schema_path: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_path: "car_price_model.onnx".to_string(),
            schema_path: "model_features.json".to_string(),
        }
    }
}

/// Input range checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub enabled: bool,
    pub limits: ValidationConfig,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: ValidationConfig::default(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required if given) or the default file
    /// (optional), with environment overrides on top
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:8080");
        assert!(settings.validation.enabled);
        assert_eq!(settings.validation.limits.min_year, 2000);
        assert_eq!(settings.current_year, None);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
current_year = 2024

[artifacts]
model_path = "models/linear.json"

[validation]
enabled = false

[logging]
json = true
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(settings.current_year, Some(2024));
        assert_eq!(settings.artifacts.model_path, "models/linear.json");
        assert_eq!(settings.artifacts.schema_path, "model_features.json");
        assert!(!settings.validation.enabled);
        assert!(settings.logging.json);
        assert_eq!(settings.server.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(Settings::load(Some("/nonexistent/car-price.toml")).is_err());
    }
}
