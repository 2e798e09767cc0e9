//! Configuration module

use std::env;
use std::str::FromStr;

use validator::Validate;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Path to the model artifact bundle
    #[validate(length(min = 1))]
    pub model_path: String,

    /// Bind address
    #[validate(length(min = 1))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: "model/breast_cancer_model.json".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model_path: env::var("MODEL_PATH").unwrap_or(defaults.model_path),

            host: env::var("HOST").unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.log_format),
        }
    }
}
