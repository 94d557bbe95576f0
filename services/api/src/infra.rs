use async_trait::async_trait;
use capwaze_intake::config::{MailConfig, MailTransport};
use capwaze_intake::intake::{LogMailer, MailError, Mailer, OutgoingEmail, SmtpMailer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mail backend chosen by `MAIL_TRANSPORT`.
pub(crate) enum ConfiguredMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl ConfiguredMailer {
    pub(crate) fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        Ok(match config.transport {
            MailTransport::Smtp => Self::Smtp(SmtpMailer::from_config(config)?),
            MailTransport::Log => Self::Log(LogMailer),
        })
    }
}

#[async_trait]
impl Mailer for ConfiguredMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        match self {
            ConfiguredMailer::Smtp(mailer) => mailer.send(email).await,
            ConfiguredMailer::Log(mailer) => mailer.send(email).await,
        }
    }
}
