//! TOML-based application configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::artifacts::{ArtifactPaths, MODEL_FILE, SCALER_FILE};
use crate::features::FeatureRecord;
use crate::inputs::{Field, SLIDERS, spec_for};

/// Top-level configuration parsed from TOML.
///
/// Every section is optional; missing sections use their defaults. Load with
/// [`AppConfig::from_toml_file`] or fall back to [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Where the model and scaler live.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    /// Starting slider positions.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Log filter and destination.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Artifact directory and file names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Directory holding both files.
    pub dir: PathBuf,
    /// Model file name inside `dir`.
    pub model_file: String,
    /// Scaler file name inside `dir`.
    pub scaler_file: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            model_file: MODEL_FILE.to_string(),
            scaler_file: SCALER_FILE.to_string(),
        }
    }
}

impl ArtifactsConfig {
    /// Resolved file locations.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::with_names(&self.dir, &self.model_file, &self.scaler_file)
    }
}

/// Starting slider positions. Values must lie within each slider's bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub irradiation: f64,
    pub module_temperature: f64,
    pub ambient_temperature: f64,
    pub hour: u32,
    pub minute: u32,
    pub month: u32,
    pub day_of_year: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let d = FeatureRecord::defaults();
        Self {
            irradiation: d.irradiation,
            module_temperature: d.module_temperature,
            ambient_temperature: d.ambient_temperature,
            hour: d.hour,
            minute: d.minute,
            month: d.month,
            day_of_year: d.day_of_year,
        }
    }
}

impl DefaultsConfig {
    /// The starting positions as a record.
    pub fn record(&self) -> FeatureRecord {
        FeatureRecord {
            ambient_temperature: self.ambient_temperature,
            module_temperature: self.module_temperature,
            irradiation: self.irradiation,
            month: self.month,
            day_of_year: self.day_of_year,
            hour: self.hour,
            minute: self.minute,
        }
    }
}

/// Log filter and optional log file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file. Headless modes log to stderr when absent; the UI logs nowhere.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            file: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"defaults.hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let a = &self.artifacts;
        if a.model_file.trim().is_empty() {
            errors.push(ConfigError {
                field: "artifacts.model_file".into(),
                message: "must not be empty".into(),
            });
        }
        if a.scaler_file.trim().is_empty() {
            errors.push(ConfigError {
                field: "artifacts.scaler_file".into(),
                message: "must not be empty".into(),
            });
        }
        if !a.model_file.is_empty() && a.model_file == a.scaler_file {
            errors.push(ConfigError {
                field: "artifacts.scaler_file".into(),
                message: "must differ from artifacts.model_file".into(),
            });
        }

        let start = self.defaults.record();
        for spec in &SLIDERS {
            let value = spec.field.get(&start);
            if !spec.contains(value) {
                errors.push(ConfigError {
                    field: format!("defaults.{}", spec.field.key()),
                    message: format!(
                        "must be in [{}, {}], got {}",
                        spec.format(spec.min),
                        spec.format(spec.max),
                        value
                    ),
                });
            }
        }
        let minute = spec_for(Field::Minute);
        if self.defaults.minute % (minute.step as u32) != 0 {
            errors.push(ConfigError {
                field: "defaults.minute".into(),
                message: format!("must be a multiple of {}", minute.step),
            });
        }

        if self.logging.filter.trim().is_empty() {
            errors.push(ConfigError {
                field: "logging.filter".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let cfg = AppConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.defaults.record(), FeatureRecord::defaults());
    }

    #[test]
    fn default_paths_are_in_working_dir() {
        let p = AppConfig::default().artifacts.paths();
        assert_eq!(p.model, Path::new(".").join("xgb_model.json"));
        assert_eq!(p.scaler, Path::new(".").join("scaler.json"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[artifacts]
dir = "models"
model_file = "model.json"
scaler_file = "std.json"

[defaults]
irradiation = 0.9
module_temperature = 50.0
ambient_temperature = 25.0
hour = 14
minute = 45
month = 7
day_of_year = 190

[logging]
filter = "solar_predict=debug"
file = "predict.log"
"#;
        let cfg = AppConfig::from_toml_str(toml).expect("valid TOML should parse");
        assert_eq!(cfg.artifacts.paths().model, Path::new("models").join("model.json"));
        assert_eq!(cfg.defaults.hour, 14);
        assert_eq!(cfg.logging.file, Some(PathBuf::from("predict.log")));
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[defaults]
hour = 6
"#;
        let cfg = AppConfig::from_toml_str(toml).expect("partial TOML should parse");
        assert_eq!(cfg.defaults.hour, 6);
        assert_eq!(cfg.defaults.minute, 30);
        assert_eq!(cfg.artifacts.model_file, "xgb_model.json");
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[defaults]
wind_speed = 3.0
"#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_out_of_range_defaults() {
        let mut cfg = AppConfig::default();
        cfg.defaults.hour = 24;
        cfg.defaults.irradiation = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "defaults.hour"));
        assert!(errors.iter().any(|e| e.field == "defaults.irradiation"));
    }

    #[test]
    fn validation_catches_off_grid_minute() {
        let mut cfg = AppConfig::default();
        cfg.defaults.minute = 20;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "defaults.minute");
    }

    #[test]
    fn validation_catches_same_file_names() {
        let mut cfg = AppConfig::default();
        cfg.artifacts.scaler_file = cfg.artifacts.model_file.clone();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "artifacts.scaler_file"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::from_toml_file(Path::new("does/not/exist.toml"))
            .expect_err("missing file should fail");
        let msg = err.to_string();
        assert!(msg.contains("does/not/exist.toml"), "{msg}");
    }
}
