use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the client.
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

/// Top-level configuration for the job board client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("JOB_BOARD_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let base_url = validate_base_url(base_url)?;

        let timeout_secs = env::var("JOB_BOARD_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let auth_token = env::var("JOB_BOARD_API_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = env::var("APP_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or(Ok(LogFormat::Compact))?;

        Ok(Self {
            environment,
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
                auth_token,
            },
            telemetry: TelemetryConfig { log_level, format },
        })
    }
}

fn validate_base_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    match reqwest::Url::parse(&trimmed) {
        Ok(url) if url.cannot_be_a_base() => Err(ConfigError::InvalidBaseUrl {
            value: raw,
            reason: "url cannot be used as a base".to_string(),
        }),
        Ok(_) => Ok(trimmed),
        Err(err) => Err(ConfigError::InvalidBaseUrl {
            value: raw,
            reason: err.to_string(),
        }),
    }
}

/// Settings for the remote job service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub auth_token: Option<String>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

/// Layout of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout,
    InvalidBaseUrl { value: String, reason: String },
    InvalidLogFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout => {
                write!(f, "JOB_BOARD_API_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidBaseUrl { value, reason } => {
                write!(f, "JOB_BOARD_API_URL '{value}' is not a valid url ({reason})")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT '{value}' must be 'compact' or 'full'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
