use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde_json::json;
use tracing::{debug, error, info};

use super::document::{NotificationDocument, RenderError};
use super::mailer::{MailError, Mailer, OutgoingEmail};
use super::submission::ApplicationSubmission;
use super::template::TemplateProfile;

/// Every notification goes to this inbox.
pub const NOTIFICATION_RECIPIENT: &str = "leo@capwaze.com";

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

const SUCCESS_MESSAGE: &str = "Application submitted successfully";
const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
const FAILURE_MESSAGE: &str = "Failed to submit application. Please try again.";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";
const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Reasons a submission did not result in a delivered notification.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request body exceeds the size limit or could not be read")]
    UnreadableBody,
    #[error(transparent)]
    Formatting(#[from] RenderError),
    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::MissingFields(_) => StatusCode::BAD_REQUEST,
            IntakeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            IntakeError::UnreadableBody => StatusCode::PAYLOAD_TOO_LARGE,
            IntakeError::Formatting(_) | IntakeError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Caller-facing body. Causes stay in the logs.
    fn body(&self) -> serde_json::Value {
        match self {
            IntakeError::MissingFields(_) => {
                json!({ "success": false, "message": MISSING_FIELDS_MESSAGE })
            }
            IntakeError::MethodNotAllowed => json!({ "message": METHOD_NOT_ALLOWED_MESSAGE }),
            IntakeError::UnreadableBody => {
                json!({ "success": false, "message": BODY_TOO_LARGE_MESSAGE })
            }
            IntakeError::Formatting(_) | IntakeError::Delivery(_) => {
                json!({ "success": false, "message": FAILURE_MESSAGE })
            }
        }
    }
}

/// Result of one handler invocation, independent of the HTTP framework.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeResponse {
    pub status: StatusCode,
    pub body: Option<serde_json::Value>,
}

impl IntakeResponse {
    fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    fn accepted() -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(json!({ "success": true, "message": SUCCESS_MESSAGE })),
        }
    }
}

impl From<IntakeError> for IntakeResponse {
    fn from(error: IntakeError) -> Self {
        Self {
            status: error.status(),
            body: Some(error.body()),
        }
    }
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };

        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        response
    }
}

/// Validates a submission, renders it and hands it to the mailer.
pub struct IntakeHandler<M> {
    mailer: Arc<M>,
    profile: TemplateProfile,
    sender: String,
}

impl<M> IntakeHandler<M>
where
    M: Mailer + 'static,
{
    pub fn new(mailer: Arc<M>, profile: TemplateProfile, sender: impl Into<String>) -> Self {
        Self {
            mailer,
            profile,
            sender: sender.into(),
        }
    }

    pub fn profile(&self) -> &TemplateProfile {
        &self.profile
    }

    /// Handle one request: method gate, validation, rendering, delivery.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> IntakeResponse {
        if *method == Method::OPTIONS {
            return IntakeResponse::preflight();
        }
        if *method != Method::POST {
            debug!(%method, "rejecting non-POST intake request");
            return IntakeError::MethodNotAllowed.into();
        }

        let submission = ApplicationSubmission::from_body(body);
        match self.submit(&submission).await {
            Ok(()) => {
                info!(recipient = NOTIFICATION_RECIPIENT, "application notification sent");
                IntakeResponse::accepted()
            }
            Err(err @ IntakeError::MissingFields(_)) => {
                debug!(error = %err, "rejecting incomplete application");
                err.into()
            }
            Err(err) => {
                error!(error = %err, "error processing application");
                err.into()
            }
        }
    }

    /// Validate, render and deliver an already-parsed submission.
    pub async fn submit(&self, submission: &ApplicationSubmission) -> Result<(), IntakeError> {
        submission.validate().map_err(IntakeError::MissingFields)?;

        let document = NotificationDocument::assemble(submission, &self.profile, &Local::now())?;
        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: NOTIFICATION_RECIPIENT.to_string(),
            subject: document.subject,
            html: document.html,
        };

        self.mailer.send(email).await?;
        Ok(())
    }
}
