use crate::config::{LogFormat, TelemetryConfig};
use std::fmt;
use std::io::IsTerminal;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// HTTP stack crates held at `warn` unless `RUST_LOG` asks otherwise.
const TRANSPORT_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directives: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directives, .. } => {
                write!(f, "APP_LOG_LEVEL '{directives}' is not a valid tracing filter")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Directives for the configured level, with the transport crates quieted.
fn directives(level: &str) -> String {
    let mut directives = vec![level.trim().to_string()];
    directives.extend(
        TRANSPORT_TARGETS
            .iter()
            .map(|target| format!("{target}=warn")),
    );
    directives.join(",")
}

fn configured_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = directives(level);
    EnvFilter::try_new(&directives)
        .map_err(|source| TelemetryError::InvalidFilter { directives, source })
}

/// Installs the global subscriber on stderr, keeping stdout for listing output.
///
/// `RUST_LOG` replaces the configured directives entirely.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };
    let ansi = std::io::stderr().is_terminal();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi);

    let installed = match config.format {
        LogFormat::Compact => builder.with_target(false).compact().try_init(),
        LogFormat::Full => builder.with_target(true).try_init(),
    };
    installed.map_err(TelemetryError::AlreadyInstalled)
}
