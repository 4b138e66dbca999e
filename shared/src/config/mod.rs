//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `api` - REST backend, dashboard streams and search behaviour
//! - `environment` - Environment detection and logging configuration
//! - `session` - Client-local session cache location

pub mod api;
pub mod environment;
pub mod session;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;

// Re-export commonly used types
pub use api::{ApiConfig, SearchConfig, StreamConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// REST backend configuration
    pub api: ApiConfig,

    /// Dashboard stream configuration
    pub stream: StreamConfig,

    /// Search and listing configuration
    pub search: SearchConfig,

    /// Session cache configuration
    pub session: SessionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            api: ApiConfig::default(),
            stream: StreamConfig::default(),
            search: SearchConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig::new("http://localhost:4000/api/v1"),
            stream: StreamConfig::default(),
            search: SearchConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                timeout_secs: 15,
                ..ApiConfig::new("https://lms.example.com/api/v1")
            },
            stream: StreamConfig::default(),
            search: SearchConfig::default(),
            session: SessionConfig::file(".lms-session.json"),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables on top of the environment preset
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.api = ApiConfig::from_env_with(config.api);
        config.search = SearchConfig::from_env();
        let session = SessionConfig::from_env();
        if !session.is_in_memory() {
            config.session = session;
        }
        config.logging = config.logging.with_env_overrides();
        config
    }

    /// Load configuration from a TOML/JSON/YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load the environment's config file when present, otherwise environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        let file = env.config_file();
        let config = if Path::new(file).exists() {
            let mut config = Self::from_file(file)?;
            config.logging = config.logging.with_env_overrides();
            config
        } else {
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the client cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::Invalid {
            field: "api.base_url".to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "api.base_url".to_string(),
                reason: format!("unsupported scheme `{}`", base.scheme()),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.api.login_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "api.login_path".to_string(),
                reason: "must be an absolute route".to_string(),
            });
        }
        if self.search.page_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "search.page_limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
