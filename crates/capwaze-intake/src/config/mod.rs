use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::intake::TemplateProfile;

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
    pub mail: MailConfig,
    pub intake: IntakeConfig,
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

        let mail = MailConfig::from_env()?;

        let profile_name = env::var("INTAKE_TEMPLATE").unwrap_or_else(|_| "standard".to_string());
        let profile = TemplateProfile::from_name(&profile_name)
            .ok_or(ConfigError::UnknownTemplate(profile_name))?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail,
            intake: IntakeConfig { profile },
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

const DEFAULT_SENDER: &str = "intake@capwaze.com";

/// Which mail backend delivers notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport {
    Smtp,
    Log,
}

/// Mail account used as the sender identity and SMTP login.
#[derive(Clone)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub relay: String,
    pub username: String,
    pub password: String,
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let transport = match env::var("MAIL_TRANSPORT")
            .unwrap_or_else(|_| "smtp".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "smtp" => MailTransport::Smtp,
            "log" => MailTransport::Log,
            other => return Err(ConfigError::UnknownMailTransport(other.to_string())),
        };

        let relay = env::var("SMTP_RELAY").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let username = env::var("EMAIL_USER").unwrap_or_default();
        let password = env::var("EMAIL_PASS").unwrap_or_default();

        if transport == MailTransport::Smtp {
            if username.trim().is_empty() {
                return Err(ConfigError::MissingVar("EMAIL_USER"));
            }
            if password.is_empty() {
                return Err(ConfigError::MissingVar("EMAIL_PASS"));
            }
        }

        Ok(Self {
            transport,
            relay,
            username,
            password,
        })
    }

    /// Sender address for outgoing notifications: the mail account itself, or a
    /// placeholder when running with the log transport and no account configured.
    pub fn sender(&self) -> &str {
        if self.username.trim().is_empty() {
            DEFAULT_SENDER
        } else {
            &self.username
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("transport", &self.transport)
            .field("relay", &self.relay)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Intake handler settings.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub profile: TemplateProfile,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar(&'static str),
    UnknownMailTransport(String),
    UnknownTemplate(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar(name) => {
                write!(f, "{name} must be set when MAIL_TRANSPORT is smtp")
            }
            ConfigError::UnknownMailTransport(value) => {
                write!(f, "MAIL_TRANSPORT '{value}' is not one of: smtp, log")
            }
            ConfigError::UnknownTemplate(value) => write!(
                f,
                "INTAKE_TEMPLATE '{value}' is not one of: basic, standard, detailed"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
