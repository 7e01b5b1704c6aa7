use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "progress.rampIntervalMs")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("API key environment variable '{var}' is not set")]
    MissingApiKey { var: String },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    pub model: ModelSettings,
    pub storage: StorageSettings,
    pub progress: ProgressSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelSettings {
    /// Base URL of the generative-language API.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    /// The key itself is never read from the configuration file.
    pub api_key_env: String,
    /// Outbound request timeout. `None` waits as long as the HTTP client does.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ModelSettings {
    /// Reads the API key from the configured environment variable.
    ///
    /// # Errors
    /// The variable is unset or empty.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey { var: self.api_key_env.clone() }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Store document path. Relative paths are resolved against the workspace root.
    pub path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { path: ".lazy-ui-translator/store.json".to_string() }
    }
}

/// Pacing of the progress indicator.
///
/// The delays only slow the visible progression down so each step can be read;
/// zero disables them.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSettings {
    /// Period of the 30% → 80% ramp while the request is outstanding.
    pub ramp_interval_ms: u64,
    pub connect_delay_ms: u64,
    pub request_delay_ms: u64,
    pub receive_delay_ms: u64,
    pub parse_delay_ms: u64,
    /// Events buffered per subscriber before it starts skipping.
    pub channel_capacity: usize,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            ramp_interval_ms: 300,
            connect_delay_ms: 300,
            request_delay_ms: 200,
            receive_delay_ms: 200,
            parse_delay_ms: 300,
            channel_capacity: 32,
        }
    }
}

impl ProgressSettings {
    /// No pacing delays; the ramp interval is kept.
    #[must_use]
    pub const fn without_delays(self) -> Self {
        Self {
            connect_delay_ms: 0,
            request_delay_ms: 0,
            receive_delay_ms: 0,
            parse_delay_ms: 0,
            ..self
        }
    }

    #[must_use]
    pub const fn ramp_interval(&self) -> Duration {
        Duration::from_millis(self.ramp_interval_ms)
    }

    #[must_use]
    pub const fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub const fn receive_delay(&self) -> Duration {
        Duration::from_millis(self.receive_delay_ms)
    }

    #[must_use]
    pub const fn parse_delay(&self) -> Duration {
        Duration::from_millis(self.parse_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Daily rolling log files are written here when set; otherwise logs go to stderr.
    pub directory: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: "info".to_string(), directory: None }
    }
}

impl TranslatorSettings {
    /// # Errors
    /// - Required field is empty
    /// - Endpoint is not an http(s) URL
    /// - Zero ramp interval or channel capacity
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.model.endpoint.trim().is_empty() {
            errors.push(ValidationError::new(
                "model.endpoint",
                "The endpoint cannot be empty. Example: \"https://generativelanguage.googleapis.com/v1beta\"",
            ));
        } else if !(self.model.endpoint.starts_with("https://")
            || self.model.endpoint.starts_with("http://"))
        {
            errors.push(ValidationError::new(
                "model.endpoint",
                format!("Invalid endpoint '{}': must start with http:// or https://", self.model.endpoint),
            ));
        }

        if self.model.model.trim().is_empty() {
            errors.push(ValidationError::new(
                "model.model",
                "The model name cannot be empty. Example: \"gemini-1.5-flash\"",
            ));
        }

        if self.model.api_key_env.trim().is_empty() {
            errors.push(ValidationError::new(
                "model.apiKeyEnv",
                "The environment variable name cannot be empty. Example: \"GEMINI_API_KEY\"",
            ));
        }

        if self.model.request_timeout_secs == Some(0) {
            errors.push(ValidationError::new(
                "model.requestTimeoutSecs",
                "The timeout must be greater than zero, or remove this field",
            ));
        }

        if self.storage.path.trim().is_empty() {
            errors.push(ValidationError::new(
                "storage.path",
                "The path cannot be empty. Example: \".lazy-ui-translator/store.json\"",
            ));
        }

        if self.progress.ramp_interval_ms == 0 {
            errors.push(ValidationError::new(
                "progress.rampIntervalMs",
                "The ramp interval must be greater than zero",
            ));
        }

        if self.progress.channel_capacity == 0 {
            errors.push(ValidationError::new(
                "progress.channelCapacity",
                "The channel capacity must be greater than zero",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = TranslatorSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"model": {"model": "gemini-2.0-flash"}, "progress": {"rampIntervalMs": 100}}"#;

        let settings: TranslatorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.model.model, eq("gemini-2.0-flash"));
        assert_that!(settings.model.api_key_env, eq("GEMINI_API_KEY"));
        assert_that!(settings.progress.ramp_interval_ms, eq(100));
        assert_that!(settings.progress.connect_delay_ms, eq(300));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: TranslatorSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.model.endpoint, eq("https://generativelanguage.googleapis.com/v1beta"));
        assert_that!(settings.storage.path, eq(".lazy-ui-translator/store.json"));
        assert_that!(settings.log.filter, eq("info"));
        assert_that!(settings.log.directory, none());
        assert_that!(settings.model.request_timeout_secs, none());
    }

    #[rstest]
    fn without_delays_keeps_ramp_interval() {
        let progress = ProgressSettings::default().without_delays();

        assert_that!(progress.ramp_interval(), eq(Duration::from_millis(300)));
        assert_that!(progress.connect_delay(), eq(Duration::ZERO));
        assert_that!(progress.parse_delay(), eq(Duration::ZERO));
    }

    #[rstest]
    fn validate_invalid_endpoint_empty() {
        let mut settings = TranslatorSettings::default();
        settings.model.endpoint = String::new();

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("model.endpoint")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_endpoint_scheme() {
        let mut settings = TranslatorSettings::default();
        settings.model.endpoint = "ftp://example.test".to_string();

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("model.endpoint")),
                field!(ValidationError.message, contains_substring("ftp://example.test"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_zero_ramp_interval() {
        let mut settings = TranslatorSettings::default();
        settings.progress.ramp_interval_ms = 0;

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("progress.rampIntervalMs"))])
        );
    }

    #[rstest]
    fn validate_invalid_zero_timeout() {
        let mut settings = TranslatorSettings::default();
        settings.model.request_timeout_secs = Some(0);

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("model.requestTimeoutSecs"))])
        );
    }

    #[rstest]
    fn resolve_api_key_missing_variable() {
        let settings = ModelSettings {
            api_key_env: "LAZY_UI_TRANSLATOR_TEST_UNSET_KEY".to_string(),
            ..ModelSettings::default()
        };

        let result = settings.resolve_api_key();

        assert!(matches!(
            result,
            Err(ConfigError::MissingApiKey { var }) if var == "LAZY_UI_TRANSLATOR_TEST_UNSET_KEY"
        ));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let mut settings = TranslatorSettings::default();
        settings.model.model = String::new();
        settings.storage.path = String::new();

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. model.model"));
        assert_that!(error_message, contains_substring("2. storage.path"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
