//! Funding application intake: turns a submitted form into a notification email.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
