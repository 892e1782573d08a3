//! Webhook errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Webhook error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing webhook event type")]
    MissingEventType,

    #[error("Error while parsing webhook event for type {event_type},\n  caused by: {source}")]
    EventParseError {
        event_type: String,
        source: serde_json::Error,
    },

    #[error("Missing webhook signature.")]
    MissingWebhookSignature,

    #[error("Invalid webhook signature.")]
    InvalidWebhookSignature,

    #[error("Could not read webhook payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Webhook payload too large.")]
    PayloadTooLarge,

    #[error("Domain error,\n  caused by: {source}")]
    DomainError {
        source: bailiff_core::DomainError,
    },

    #[error("Processing timed out.")]
    Timeout,

    #[error("Metrics error,\n  caused by: {source}")]
    MetricsError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error,\n  caused by: {source}")]
    IoError { source: std::io::Error },
}

impl ServerError {
    fn public_message(&self) -> &'static str {
        match self {
            ServerError::DomainError { .. } | ServerError::Timeout => {
                "failed to process issue comment"
            }
            e if e.status_code() == StatusCode::BAD_REQUEST => "invalid request",
            _ => "internal error",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ServerError::MissingEventType
            | ServerError::EventParseError { .. }
            | ServerError::MissingWebhookSignature
            | ServerError::InvalidWebhookSignature
            | ServerError::InvalidPayload { .. }
            | ServerError::PayloadTooLarge => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.public_message())
    }
}

impl From<bailiff_core::DomainError> for ServerError {
    fn from(e: bailiff_core::DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

/// Result alias for `ServerError`.
pub type Result<T, E = ServerError> = core::result::Result<T, E>;
