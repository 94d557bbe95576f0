use std::sync::Arc;

use axum::{
    body::{to_bytes, Bytes},
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tracing::debug;

use super::handler::{IntakeError, IntakeHandler, IntakeResponse};
use super::mailer::Mailer;

/// Path the contact form posts to.
pub const SUBMIT_PATH: &str = "/api/submit-application";

/// Largest submission body read before answering 413.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Router exposing the intake endpoint. Every method is routed so the handler can answer
/// pre-flight and rejected methods with the CORS headers attached.
pub fn intake_router<M>(handler: Arc<IntakeHandler<M>>) -> Router
where
    M: Mailer + 'static,
{
    Router::new()
        .route(SUBMIT_PATH, any(submit_handler::<M>))
        .with_state(handler)
}

/// The body is read here rather than through an extractor so that an unreadable or
/// oversized body still gets a response carrying the CORS headers.
pub(crate) async fn submit_handler<M>(
    State(handler): State<Arc<IntakeHandler<M>>>,
    request: Request,
) -> Response
where
    M: Mailer + 'static,
{
    let (parts, body) = request.into_parts();

    let body = if parts.method == Method::POST {
        match to_bytes(body, MAX_BODY_BYTES).await {
            Ok(body) => body,
            Err(err) => {
                debug!(error = %err, "unable to read intake request body");
                return IntakeResponse::from(IntakeError::UnreadableBody).into_response();
            }
        }
    } else {
        Bytes::new()
    };

    handler.handle(&parts.method, &body).await.into_response()
}
