//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main batch settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Input/output file locations
    #[serde(default)]
    pub io: IoConfig,

    /// Morphological analyzer backend
    #[serde(default)]
    pub analyzer: AnalyzerSettings,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_io()?;
        self.validate_analyzer()?;
        Ok(())
    }

    fn validate_io(&self) -> Result<(), ConfigError> {
        if self.io.input_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "io.input_path".to_string(),
                message: "Input path must not be empty".to_string(),
            });
        }

        if self.io.output_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "io.output_path".to_string(),
                message: "Output path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_analyzer(&self) -> Result<(), ConfigError> {
        match self.analyzer.backend {
            AnalyzerBackend::Mystem => {
                if self.analyzer.mystem_binary.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "analyzer.mystem_binary".to_string(),
                        message: "Mystem binary must not be empty".to_string(),
                    });
                }
            },
            AnalyzerBackend::Lexicon => {
                let Some(path) = self.analyzer.lexicon_path.as_deref() else {
                    return Err(ConfigError::MissingField("analyzer.lexicon_path".to_string()));
                };
                if !Path::new(path).exists() {
                    return Err(ConfigError::FileNotFound(path.to_string()));
                }
            },
        }

        Ok(())
    }
}

/// Transcript file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// CSV file with `dlg_id, line_n, role, text` columns
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Annotated CSV written at the end of the batch
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_input_path() -> String {
    "test_data.csv".to_string()
}

fn default_output_path() -> String {
    "test_data_result.csv".to_string()
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
        }
    }
}

/// Available morphology backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerBackend {
    /// Yandex mystem subprocess
    #[default]
    Mystem,
    /// Static word list loaded from a TOML file
    Lexicon,
}

/// Morphology backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    #[serde(default)]
    pub backend: AnalyzerBackend,

    /// Path or name of the mystem executable
    #[serde(default = "default_mystem_binary")]
    pub mystem_binary: String,

    /// Lexicon file, required for the lexicon backend
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

fn default_mystem_binary() -> String {
    "mystem".to_string()
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            backend: AnalyzerBackend::default(),
            mystem_binary: default_mystem_binary(),
            lexicon_path: None,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (CALL_INSIGHTS_ prefix)
/// 2. config/{env}.* (if env specified)
/// 3. config/default.*
///
/// The result is not validated.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Same as `load_settings`, reading files from `dir` instead of `config/`
///
/// Settings are returned unvalidated so command line overrides can still
/// complete them; call `Settings::validate` once all layers are applied.
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("CALL_INSIGHTS")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("default"),
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.io.input_path, "test_data.csv");
        assert_eq!(settings.io.output_path, "test_data_result.csv");
        assert_eq!(settings.analyzer.backend, AnalyzerBackend::Mystem);
        assert_eq!(settings.analyzer.mystem_binary, "mystem");
        assert_eq!(settings.observability.log_level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut settings = Settings::default();
        settings.io.input_path = " ".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.io.output_path = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_lexicon_backend_requires_existing_path() {
        let mut settings = Settings::default();
        settings.analyzer.backend = AnalyzerBackend::Lexicon;
        assert!(matches!(settings.validate(), Err(ConfigError::MissingField(_))));

        settings.analyzer.lexicon_path = Some("/definitely/not/here.toml".to_string());
        assert!(matches!(settings.validate(), Err(ConfigError::FileNotFound(_))));

        let file = tempfile::NamedTempFile::new().unwrap();
        settings.analyzer.lexicon_path = Some(file.path().display().to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_layered_files() {
        let dir = tempfile::tempdir().unwrap();

        let mut default = std::fs::File::create(dir.path().join("default.toml")).unwrap();
        writeln!(default, "[io]\ninput_path = \"calls.csv\"\n\n[observability]\nlog_level = \"warn\"").unwrap();

        let mut staging = std::fs::File::create(dir.path().join("staging.toml")).unwrap();
        writeln!(staging, "[observability]\nlog_level = \"debug\"\nlog_json = true").unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.io.input_path, "calls.csv");
        assert_eq!(settings.observability.log_level, "warn");

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.io.input_path, "calls.csv");
        assert_eq!(settings.io.output_path, "test_data_result.csv");
        assert_eq!(settings.observability.log_level, "debug");
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_load_keeps_incomplete_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[io]\ninput_path = \"calls.csv\"\n\n[analyzer]\nbackend = \"lexicon\"\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.io.input_path, "calls.csv");
        assert_eq!(settings.analyzer.backend, AnalyzerBackend::Lexicon);
        assert!(matches!(settings.validate(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_unparsable_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[analyzer]\nbackend = \"spacy\"\n")
            .unwrap();

        assert!(matches!(
            load_settings_from(dir.path(), None),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_settings_toml_round_trip() {
        let mut settings = Settings::default();
        settings.analyzer.backend = AnalyzerBackend::Lexicon;
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("backend = \"lexicon\""));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.analyzer.backend, AnalyzerBackend::Lexicon);
    }
}
