//! Configuration for codeaudit
//!
//! Settings load from environment variables with sensible defaults. A missing
//! credential is not an error here: the service starts without a backend and
//! reports itself unavailable through the health endpoint.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: LLM credential; when absent the auditor is unavailable
//! - `CODEAUDIT_MODEL`: model name - default: "gpt-3.5-turbo"
//! - `CODEAUDIT_API_ENDPOINT`: endpoint override for OpenAI-compatible servers
//! - `CODEAUDIT_REQUEST_TIMEOUT`: timeout in seconds - default: "30"
//! - `CODEAUDIT_PORT`: HTTP listen port - default: "5000"
//! - `CODEAUDIT_LOG_LEVEL`: logging level - default: "info"

use crate::ai::openai::{OpenAiClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Runtime configuration, usually built from the environment via
/// `AuditConfig::default()`.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// LLM credential. `None` means the auditor runs unconfigured.
    pub api_key: Option<String>,

    /// Model name for chat completions.
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    pub api_endpoint: String,

    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,

    /// HTTP listen port for `codeaudit serve`.
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = env::var("CODEAUDIT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let api_endpoint =
            env::var("CODEAUDIT_API_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let request_timeout_secs = env::var("CODEAUDIT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let port = env::var("CODEAUDIT_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_level = env::var("CODEAUDIT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            api_key,
            model,
            api_endpoint,
            request_timeout_secs,
            port,
            log_level,
        }
    }
}

impl AuditConfig {
    /// Validates numeric ranges and the log level. Credential presence is
    /// intentionally not validated; see the module docs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Builds the LLM client when a credential is configured.
    pub fn create_backend(&self) -> Option<Arc<OpenAiClient>> {
        self.api_key.as_ref().map(|key| {
            Arc::new(OpenAiClient::with_config(
                self.api_endpoint.clone(),
                key.clone(),
                self.model.clone(),
                Duration::from_secs(self.request_timeout_secs),
            ))
        })
    }
}

impl fmt::Display for AuditConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Codeaudit Configuration:")?;
        writeln!(
            f,
            "  API Key: {}",
            if self.api_key.is_some() { "configured" } else { "missing" }
        )?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Endpoint: {}", self.api_endpoint)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Port: {}", self.port)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Temporarily sets an environment variable, restoring it on drop.
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
    fn test_defaults_without_env() {
        let _guards = [
            EnvGuard::unset("OPENAI_API_KEY"),
            EnvGuard::unset("CODEAUDIT_MODEL"),
            EnvGuard::unset("CODEAUDIT_API_ENDPOINT"),
            EnvGuard::unset("CODEAUDIT_REQUEST_TIMEOUT"),
            EnvGuard::unset("CODEAUDIT_PORT"),
            EnvGuard::unset("CODEAUDIT_LOG_LEVEL"),
        ];

        let config = AuditConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.create_backend().is_none());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guards = [
            EnvGuard::set("OPENAI_API_KEY", "sk-test"),
            EnvGuard::set("CODEAUDIT_MODEL", "gpt-4"),
            EnvGuard::set("CODEAUDIT_API_ENDPOINT", "http://localhost:11434"),
            EnvGuard::set("CODEAUDIT_REQUEST_TIMEOUT", "60"),
            EnvGuard::set("CODEAUDIT_PORT", "8080"),
            EnvGuard::set("CODEAUDIT_LOG_LEVEL", "DEBUG"),
        ];

        let config = AuditConfig::default();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.api_endpoint, "http://localhost:11434");
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "debug");
        assert!(config.create_backend().is_some());
    }

    #[test]
    #[serial]
    fn test_blank_api_key_treated_as_missing() {
        let _guard = EnvGuard::set("OPENAI_API_KEY", "   ");
        let config = AuditConfig::default();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AuditConfig {
            request_timeout_secs: 0,
            ..test_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let config = AuditConfig {
            log_level: "loud".to_string(),
            ..test_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_display_does_not_leak_key() {
        let config = AuditConfig {
            api_key: Some("sk-secret".to_string()),
            ..test_config()
        };
        let shown = format!("{}", config);
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains("configured"));
    }

    fn test_config() -> AuditConfig {
        AuditConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
