//! # Configuration Settings
//!
//! Defines the configuration structure for the provisioning tooling.
//! Everything is loadable from `SITEVAULT_`-prefixed environment variables
//! and validated before use; the platform credential is always passed in
//! explicitly, never read from the environment inside business logic.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::errors::{Error, Result};
use crate::platform::{NetlifyConfig, SecretString};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Hosting platform configuration
    #[validate(nested)]
    pub platform: PlatformConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            platform: PlatformConfig::from_env()?,
            observability: ObservabilityConfig::from_env(),
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    /// Custom validation logic that goes beyond what the validator crate can do
    fn validate_custom(&self) -> Result<()> {
        if self.platform.token.is_empty() {
            return Err(Error::validation_field(
                "Platform token is required (set SITEVAULT_NETLIFY_TOKEN)",
                "platform.token",
            ));
        }

        if !self.platform.base_url.starts_with("http://")
            && !self.platform.base_url.starts_with("https://")
        {
            return Err(Error::validation_field(
                "Platform base URL must start with 'http://' or 'https://'",
                "platform.base_url",
            ));
        }

        Ok(())
    }
}

/// Hosting platform configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlatformConfig {
    /// Platform API base URL
    #[validate(length(min = 1, message = "Base URL cannot be empty"))]
    pub base_url: String,

    /// Platform bearer token
    pub token: SecretString,

    /// Per-request timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Timeout must be between 1 and 300 seconds"
    ))]
    pub timeout_seconds: u64,

    /// Deadline in seconds for each provisioning write
    #[validate(range(
        min = 1,
        max = 600,
        message = "Provision deadline must be between 1 and 600 seconds"
    ))]
    pub provision_deadline_seconds: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let defaults = NetlifyConfig::default();
        Self {
            base_url: defaults.base_url,
            token: SecretString::default(),
            timeout_seconds: defaults.timeout_seconds,
            provision_deadline_seconds: defaults.provision_deadline_seconds,
        }
    }
}

impl PlatformConfig {
    /// Create platform configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let token = std::env::var("SITEVAULT_NETLIFY_TOKEN")
            .map(SecretString::new)
            .unwrap_or_default();

        let base_url =
            std::env::var("SITEVAULT_NETLIFY_BASE_URL").unwrap_or(defaults.base_url);

        let timeout_seconds = parse_env_u64("SITEVAULT_HTTP_TIMEOUT_SECS")?
            .unwrap_or(defaults.timeout_seconds);

        let provision_deadline_seconds = parse_env_u64("SITEVAULT_PROVISION_DEADLINE_SECS")?
            .unwrap_or(defaults.provision_deadline_seconds);

        Ok(Self { base_url, token, timeout_seconds, provision_deadline_seconds })
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl From<&PlatformConfig> for NetlifyConfig {
    fn from(config: &PlatformConfig) -> Self {
        NetlifyConfig {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            timeout_seconds: config.timeout_seconds,
            provision_deadline_seconds: config.provision_deadline_seconds,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g. "info", "sitevault=debug")
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable lines
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logs: false }
    }
}

impl ObservabilityConfig {
    /// Create observability configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("SITEVAULT_LOG_LEVEL").unwrap_or(defaults.log_level);
        let json_logs = std::env::var("SITEVAULT_LOG_JSON")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.json_logs);

        Self { log_level, json_logs }
    }
}

fn parse_env_u64(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| Error::config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.platform.base_url, "https://api.netlify.com/api/v1");
        assert_eq!(config.platform.timeout_seconds, 30);
        assert_eq!(config.platform.provision_deadline_seconds, 60);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("SITEVAULT_NETLIFY_TOKEN", "nt1");
        env::set_var("SITEVAULT_NETLIFY_BASE_URL", "http://127.0.0.1:9999");
        env::set_var("SITEVAULT_HTTP_TIMEOUT_SECS", "5");
        env::set_var("SITEVAULT_PROVISION_DEADLINE_SECS", "10");
        env::set_var("SITEVAULT_LOG_LEVEL", "debug");
        env::set_var("SITEVAULT_LOG_JSON", "true");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.platform.token.expose_secret(), "nt1");
        assert_eq!(config.platform.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.platform.timeout_seconds, 5);
        assert_eq!(config.platform.provision_deadline_seconds, 10);
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.json_logs);
        assert!(config.validate().is_ok());

        env::remove_var("SITEVAULT_NETLIFY_TOKEN");
        env::remove_var("SITEVAULT_NETLIFY_BASE_URL");
        env::remove_var("SITEVAULT_HTTP_TIMEOUT_SECS");
        env::remove_var("SITEVAULT_PROVISION_DEADLINE_SECS");
        env::remove_var("SITEVAULT_LOG_LEVEL");
        env::remove_var("SITEVAULT_LOG_JSON");
    }

    #[test]
    fn test_invalid_numeric_env_rejected() {
        env::set_var("SITEVAULT_TEST_BAD_U64", "not-a-number");

        let result = parse_env_u64("SITEVAULT_TEST_BAD_U64");
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        env::remove_var("SITEVAULT_TEST_BAD_U64");
    }

    #[test]
    fn test_validation_requires_token() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_validation_rejects_bad_scheme() {
        let mut config = AppConfig::default();
        config.platform.token = SecretString::new("nt1");
        config.platform.base_url = "ftp://api.example.com".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.platform.token = SecretString::new("nt1");
        config.platform.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_netlify_config_conversion() {
        let mut config = PlatformConfig::default();
        config.token = SecretString::new("nt1");
        config.timeout_seconds = 7;

        let netlify: NetlifyConfig = (&config).into();
        assert_eq!(netlify.timeout_seconds, 7);
        assert_eq!(netlify.token.expose_secret(), "nt1");
    }
}
