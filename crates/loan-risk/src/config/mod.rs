use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::prediction::DEFAULT_MODEL_VERSION;
use crate::scoring::{ConfidencePolicy, RatingTablePreset, ScoringConfig, ScoringConfigError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rating_table = match env::var("APP_RATING_TABLE") {
            Ok(raw) => raw
                .parse::<RatingTablePreset>()
                .map_err(ConfigError::InvalidRatingTable)?,
            Err(_) => RatingTablePreset::default(),
        };
        let confidence = match env::var("APP_CONFIDENCE") {
            Ok(raw) => raw
                .parse::<ConfidencePolicy>()
                .map_err(ConfigError::InvalidConfidence)?,
            Err(_) => ConfidencePolicy::default(),
        };
        let model_version = env::var("APP_MODEL_VERSION")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string());

        let scoring = ScoringSettings {
            rating_table,
            confidence,
            model_version,
        };
        scoring.rubric().validate()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Rubric selection and prediction defaults.
#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub rating_table: RatingTablePreset,
    pub confidence: ConfidencePolicy,
    pub model_version: String,
}

impl ScoringSettings {
    pub fn rubric(&self) -> ScoringConfig {
        ScoringConfig::with_preset(self.rating_table)
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            rating_table: RatingTablePreset::default(),
            confidence: ConfidencePolicy::default(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRatingTable(String),
    InvalidConfidence(String),
    Scoring(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRatingTable(reason) => write!(f, "APP_RATING_TABLE: {reason}"),
            ConfigError::InvalidConfidence(reason) => write!(f, "APP_CONFIDENCE: {reason}"),
            ConfigError::Scoring(err) => write!(f, "invalid scoring rubric: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Scoring(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidRatingTable(_)
            | ConfigError::InvalidConfidence(_) => None,
        }
    }
}

impl From<ScoringConfigError> for ConfigError {
    fn from(value: ScoringConfigError) -> Self {
        Self::Scoring(value)
    }
}
