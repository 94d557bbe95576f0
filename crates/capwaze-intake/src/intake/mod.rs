//! Funding application intake: validation, notification rendering and delivery.

pub mod document;
pub mod format;
pub mod handler;
pub mod mailer;
pub mod router;
pub mod submission;
pub mod template;

#[cfg(test)]
mod tests;

pub use document::{subject_line, NotificationDocument, RenderError, SOURCE_LABEL};
pub use format::{format_address, format_date, FieldCategory, NOT_PROVIDED, NOT_SPECIFIED};
pub use handler::{IntakeError, IntakeHandler, IntakeResponse, NOTIFICATION_RECIPIENT};
pub use mailer::{LogMailer, MailError, Mailer, OutgoingEmail, SmtpMailer};
pub use router::{intake_router, MAX_BODY_BYTES, SUBMIT_PATH};
pub use submission::{ApplicationSubmission, REQUIRED_FIELDS};
pub use template::{Styling, TemplateProfile};
