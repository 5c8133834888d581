//! Outbound webhook transport.
//!
//! Every request, probe or user message, goes through `WebhookTransport`.
//! The HTTP implementation lives in [`http`]; tests substitute their own.

mod http;


use async_trait::async_trait;
use serde::Serialize;
use testflows_common::SessionId;

pub use http::HttpTransport;

/// JSON body posted to the webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload<'a> {
    pub message: &'a str,
}

#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST `message` to `endpoint`, tagged with `session_id`, and return the
    /// decoded JSON body of a successful response.
    async fn post_message(
        &self,
        endpoint: &str,
        session_id: &SessionId,
        message: &str,
    ) -> Result<serde_json::Value, ExchangeError>;
}

/// Why a single exchange with the webhook failed.
///
/// Only used for logging: every variant ends up as the same error entry.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("invalid session header: {0}")]
    InvalidHeader(String),
}
