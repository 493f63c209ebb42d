//! Configuration for convotag
//!
//! All settings load from environment variables with fixed defaults matching
//! the reference deployment. Nothing here touches the network; credential
//! loading and client construction live in [`crate::context`].
//!
//! # Environment Variables
//!
//! - `CONVOTAG_ADC_PATH`: credentials file path - default: `~/.config/gcloud/application_default_credentials.json`
//! - `CONVOTAG_PROJECT_ID`: Google Cloud project identifier
//! - `CONVOTAG_DATASET_ID`: data-warehouse dataset name
//! - `CONVOTAG_LOCATION`: Vertex AI region - default: "us-central1"
//! - `CONVOTAG_MODEL`: hosted model identifier - default: "gemini-2.0-flash-lite"
//! - `CONVOTAG_REQUEST_TIMEOUT`: request timeout in seconds - default: "30"
//! - `CONVOTAG_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PROJECT_ID: &str = "commanding-iris-806";
const DEFAULT_DATASET_ID: &str = "sony_test";
const DEFAULT_LOCATION: &str = "us-central1";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Relative path of the gcloud ADC file under the home directory
const ADC_RELATIVE_PATH: &str = ".config/gcloud/application_default_credentials.json";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for convotag
///
/// Construct with `Default::default()` to load from environment variables
/// with fallback defaults, then call [`ConvotagConfig::validate`].
#[derive(Debug, Clone)]
pub struct ConvotagConfig {
    /// Path to the authorized-user credentials file
    pub adc_path: PathBuf,

    /// Google Cloud project identifier
    pub project_id: String,

    /// Data-warehouse dataset name
    pub dataset_id: String,

    /// Vertex AI region
    pub location: String,

    /// Hosted model identifier used for generation
    pub model: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ConvotagConfig {
    fn default() -> Self {
        let adc_path = env::var("CONVOTAG_ADC_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(default_adc_path);

        let project_id =
            env::var("CONVOTAG_PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string());
        let dataset_id =
            env::var("CONVOTAG_DATASET_ID").unwrap_or_else(|_| DEFAULT_DATASET_ID.to_string());
        let location =
            env::var("CONVOTAG_LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string());
        let model = env::var("CONVOTAG_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs = env::var("CONVOTAG_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env::var("CONVOTAG_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            adc_path,
            project_id,
            dataset_id,
            location,
            model,
            request_timeout_secs,
            log_level,
        }
    }
}

fn default_adc_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ADC_RELATIVE_PATH)
}

impl ConvotagConfig {
    /// Validates the configuration
    ///
    /// Credential-file existence is deliberately not checked here; that check
    /// happens on first credential access and surfaces as a
    /// [`crate::auth::CredentialError`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` when a field is empty or a
    /// numeric value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("project_id", &self.project_id),
            ("dataset_id", &self.dataset_id),
            ("location", &self.location),
            ("model", &self.model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationFailed(format!(
                    "invalid log level: {other}. Valid options: trace, debug, info, warn, error"
                )))
            }
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Display for ConvotagConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Convotag Configuration:")?;
        writeln!(f, "  ADC Path: {}", self.adc_path.display())?;
        writeln!(f, "  Project: {}", self.project_id)?;
        writeln!(f, "  Dataset: {}", self.dataset_id)?;
        writeln!(f, "  Location: {}", self.location)?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("CONVOTAG_ADC_PATH"),
            EnvGuard::unset("CONVOTAG_PROJECT_ID"),
            EnvGuard::unset("CONVOTAG_MODEL"),
            EnvGuard::unset("CONVOTAG_REQUEST_TIMEOUT"),
        ];

        let config = ConvotagConfig::default();

        assert_eq!(config.project_id, DEFAULT_PROJECT_ID);
        assert_eq!(config.dataset_id, DEFAULT_DATASET_ID);
        assert_eq!(config.location, DEFAULT_LOCATION);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.adc_path.ends_with(ADC_RELATIVE_PATH));
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("CONVOTAG_ADC_PATH", "/tmp/adc.json"),
            EnvGuard::set("CONVOTAG_PROJECT_ID", "other-project"),
            EnvGuard::set("CONVOTAG_LOCATION", "europe-west1"),
            EnvGuard::set("CONVOTAG_MODEL", "gemini-2.0-pro"),
            EnvGuard::set("CONVOTAG_REQUEST_TIMEOUT", "60"),
            EnvGuard::set("CONVOTAG_LOG_LEVEL", "DEBUG"),
        ];

        let config = ConvotagConfig::default();

        assert_eq!(config.adc_path, PathBuf::from("/tmp/adc.json"));
        assert_eq!(config.project_id, "other-project");
        assert_eq!(config.location, "europe-west1");
        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validation_accepts_defaults() {
        let config = ConvotagConfig {
            adc_path: PathBuf::from("/tmp/adc.json"),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset_id: DEFAULT_DATASET_ID.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_project() {
        let mut config = ConvotagConfig::default();
        config.project_id = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = ConvotagConfig::default();
        config.request_timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = ConvotagConfig::default();
        config.log_level = "loud".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_display() {
        let config = ConvotagConfig::default();
        let display = format!("{config}");
        assert!(display.contains("Convotag Configuration:"));
        assert!(display.contains("Project:"));
    }
}
