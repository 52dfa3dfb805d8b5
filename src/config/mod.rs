//! Configuration module for Turnstile
//!
//! Settings are layered: a TOML file, `TURNSTILE_*` environment
//! variables, and CLI flags each refine the built-in defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`TURNSTILE_*`)
//! 3. Configuration file (TOML)
//! 4. Built-in defaults (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use turnstile::config::TurnstileConfig;
//!
//! // Load defaults
//! let config = TurnstileConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [clients]
//! limits = { "billing" = 500 }
//! "#;
//! let config: TurnstileConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.clients.base_quota("billing"), 500);
//! ```

pub mod clients;
pub mod error;
pub mod logging;
pub mod qos;
pub mod server;

pub use clients::{ClientLimitsConfig, UNBOUNDED_QUOTA};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use qos::{QosConfig, QosMode};
pub use server::ServerConfig;

// Re-export HealthBackendConfig from probe module
pub use crate::probe::HealthBackendConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Turnstile server.
///
/// Aggregates all configuration sections: server settings, per-client
/// quotas, the optional health backend, admission behavior, and logging.
///
/// # Example
///
/// ```rust
/// use turnstile::config::TurnstileConfig;
///
/// let config = TurnstileConfig::default();
/// assert_eq!(config.server.port, 8000);
/// assert!(config.health_backend.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TurnstileConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Per-client base quotas
    pub clients: ClientLimitsConfig,
    /// Health backend to probe; absent means scaling is inert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_backend: Option<HealthBackendConfig>,
    /// Admission control behavior
    pub qos: QosConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl TurnstileConfig {
    /// Parse configuration from a TOML file.
    ///
    /// With no path the defaults are returned; a path that does not
    /// exist is a `NotFound` error rather than a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                Ok(toml::from_str(&content)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Fold `TURNSTILE_*` environment variables into the config.
    ///
    /// A value that fails to parse leaves the existing setting in
    /// place rather than aborting startup.
    pub fn with_env_overrides(mut self) -> Self {
        // Server settings
        if let Ok(port) = std::env::var("TURNSTILE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("TURNSTILE_HOST") {
            self.server.host = host;
        }

        // Logging settings
        if let Ok(level) = std::env::var("TURNSTILE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TURNSTILE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Admission behavior
        if let Ok(mode) = std::env::var("TURNSTILE_QOS_MODE") {
            if let Ok(m) = mode.parse() {
                self.qos.mode = m;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.qos.history_capacity == 0 {
            return Err(ConfigError::Validation {
                field: "qos.history_capacity".to_string(),
                message: "history capacity must be at least 1".to_string(),
            });
        }

        // A present-but-empty backend section is a misconfiguration, not a
        // request to disable probing; disabling is done by omitting it.
        if let Some(backend) = &self.health_backend {
            if backend.base_url.is_empty() {
                return Err(ConfigError::Validation {
                    field: "health_backend.base_url".to_string(),
                    message: "base_url cannot be empty".to_string(),
                });
            }
            if backend.timeout_seconds == 0 {
                return Err(ConfigError::Validation {
                    field: "health_backend.timeout_seconds".to_string(),
                    message: "timeout must be at least 1 second".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_turnstile_config_defaults() {
        let config = TurnstileConfig::default();
        assert_eq!(config.server.port, 8000);
        assert!(config.clients.limits.is_empty());
        assert!(config.health_backend.is_none());
        assert_eq!(config.qos.history_capacity, 100);
        assert_eq!(config.qos.mode, QosMode::Enforce);
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: TurnstileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0"); // Default
        assert!(config.health_backend.is_none());
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../turnstile.example.toml");
        let config: TurnstileConfig = toml::from_str(toml).unwrap();
        assert!(config.server.port > 0);
        assert!(config.health_backend.is_some());
        config.validate().unwrap();
    }

    #[test]
    fn test_config_parse_health_backend_section() {
        let toml = r#"
        [health_backend]
        base_url = "http://cassandra-sidecar:7070"
        metric_type = "CommitLog"
        metric_name = "PendingTasks"

        [health_backend.tags]
        dc = "east"
        "#;

        let config: TurnstileConfig = toml::from_str(toml).unwrap();
        let backend = config.health_backend.unwrap();
        assert_eq!(backend.base_url, "http://cassandra-sidecar:7070");
        assert_eq!(backend.attribute, "Value"); // Default
        assert_eq!(backend.tags.get("dc").map(String::as_str), Some("east"));
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = TurnstileConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = TurnstileConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_malformed_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = TurnstileConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_env_override_port() {
        std::env::set_var("TURNSTILE_PORT", "9999");
        let config = TurnstileConfig::default().with_env_overrides();
        assert_eq!(config.server.port, 9999);

        // Unparseable value keeps the default, not a crash
        std::env::set_var("TURNSTILE_PORT", "not-a-number");
        let config = TurnstileConfig::default().with_env_overrides();
        std::env::remove_var("TURNSTILE_PORT");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_config_env_override_host() {
        std::env::set_var("TURNSTILE_HOST", "127.0.0.1");
        let config = TurnstileConfig::default().with_env_overrides();
        std::env::remove_var("TURNSTILE_HOST");

        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("TURNSTILE_LOG_LEVEL", "debug");
        let config = TurnstileConfig::default().with_env_overrides();
        std::env::remove_var("TURNSTILE_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_override_qos_mode() {
        std::env::set_var("TURNSTILE_QOS_MODE", "observe");
        let config = TurnstileConfig::default().with_env_overrides();
        std::env::remove_var("TURNSTILE_QOS_MODE");

        assert_eq!(config.qos.mode, QosMode::Observe);
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("TURNSTILE_LOG_FORMAT", "json");
        let config = TurnstileConfig::default().with_env_overrides();
        assert_eq!(config.logging.format, LogFormat::Json);

        // An unknown format name keeps the default
        std::env::set_var("TURNSTILE_LOG_FORMAT", "xml");
        let config = TurnstileConfig::default().with_env_overrides();
        std::env::remove_var("TURNSTILE_LOG_FORMAT");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = TurnstileConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_zero_history_capacity() {
        let mut config = TurnstileConfig::default();
        config.qos.history_capacity = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "qos.history_capacity"
        ));
    }

    #[test]
    fn test_config_validation_empty_backend_url() {
        let mut config = TurnstileConfig::default();
        config.health_backend = Some(HealthBackendConfig::default());

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("base_url")
        ));
    }

    #[test]
    fn test_config_validation_zero_backend_timeout() {
        let mut config = TurnstileConfig::default();
        config.health_backend = Some(HealthBackendConfig {
            base_url: "http://localhost:7070".to_string(),
            timeout_seconds: 0,
            ..Default::default()
        });

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("timeout")
        ));
    }

    #[test]
    fn test_config_validation_valid_backend() {
        let mut config = TurnstileConfig::default();
        config.health_backend = Some(HealthBackendConfig {
            base_url: "http://localhost:7070".to_string(),
            ..Default::default()
        });

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = TurnstileConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
