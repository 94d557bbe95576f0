use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{value}' is not a valid tracing filter")
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "unable to install the tracing subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Where the active log filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    Environment,
    Config,
}

/// Directive appended to configured filters so lettre's per-command SMTP chatter stays out
/// of intake logs.
const MAIL_TRANSPORT_DIRECTIVE: &str = "lettre=warn";

/// `RUST_LOG` wins over `APP_LOG_LEVEL`. A configured level that does not already mention
/// lettre gets [`MAIL_TRANSPORT_DIRECTIVE`] appended.
pub fn build_filter(
    config: &TelemetryConfig,
) -> Result<(EnvFilter, FilterSource), TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok((filter, FilterSource::Environment));
    }

    let level = config.log_level.trim();
    let directives = if level.contains("lettre") {
        level.to_string()
    } else {
        format!("{level},{MAIL_TRANSPORT_DIRECTIVE}")
    };

    let filter = EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
        value: config.log_level.clone(),
        source,
    })?;
    Ok((filter, FilterSource::Config))
}

/// Install the global fmt subscriber for the service.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let (filter, source) = build_filter(config)?;
    let active = filter.to_string();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    info!(filter = %active, source = ?source, "telemetry initialised");
    Ok(())
}
