use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;

use crate::intake::mailer::{MailError, Mailer, OutgoingEmail};
use crate::intake::{intake_router, IntakeHandler, TemplateProfile};

pub(super) const SENDER: &str = "alerts@capwaze.com";

pub(super) fn payload() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "j@x.com",
        "phone": "555-1234",
        "company": "Acme",
        "fundingAmount": "$50,000"
    })
}

pub(super) fn body(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).expect("payload serializes")
}

#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub(super) fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer mutex poisoned").push(email);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct FailingMailer {
    attempts: Mutex<usize>,
}

impl FailingMailer {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("mailer mutex poisoned")
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), MailError> {
        *self.attempts.lock().expect("mailer mutex poisoned") += 1;
        Err(MailError::Rejected("535 authentication failed".to_string()))
    }
}

pub(super) fn recording_handler(
    profile: TemplateProfile,
) -> (Arc<IntakeHandler<RecordingMailer>>, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let handler = Arc::new(IntakeHandler::new(mailer.clone(), profile, SENDER));
    (handler, mailer)
}

pub(super) fn failing_handler() -> (Arc<IntakeHandler<FailingMailer>>, Arc<FailingMailer>) {
    let mailer = Arc::new(FailingMailer::default());
    let handler = Arc::new(IntakeHandler::new(
        mailer.clone(),
        TemplateProfile::standard(),
        SENDER,
    ));
    (handler, mailer)
}

pub(super) fn router_with_recorder() -> (axum::Router, Arc<RecordingMailer>) {
    let (handler, mailer) = recording_handler(TemplateProfile::standard());
    (intake_router(handler), mailer)
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}

/// In-memory sink for formatted tracing output.
#[derive(Clone, Default)]
pub(super) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned").clone();
        String::from_utf8(bytes).expect("utf8 logs")
    }

    /// Route events on the current thread into this buffer until the guard drops.
    pub(super) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
