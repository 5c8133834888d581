//! reqwest-backed webhook transport.

use async_trait::async_trait;
use reqwest::header::{HeaderName, CONTENT_TYPE};
use testflows_common::SessionId;
use testflows_config::WebhookConfig;
use tracing::debug;

use super::{ExchangeError, WebhookPayload, WebhookTransport};

/// Longest slice of an error body kept for logs.
const ERROR_BODY_LIMIT: usize = 200;

/// Posts JSON messages to the webhook over HTTP.
pub struct HttpTransport {
    http: reqwest::Client,
    session_header: HeaderName,
}

impl HttpTransport {
    pub fn new(session_header: &str) -> Result<Self, ExchangeError> {
        let session_header = HeaderName::from_bytes(session_header.as_bytes())
            .map_err(|e| ExchangeError::InvalidHeader(format!("{session_header:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ExchangeError::Network(e.to_string()))?;
        Ok(Self {
            http,
            session_header,
        })
    }

    pub fn from_config(config: &WebhookConfig) -> Result<Self, ExchangeError> {
        Self::new(&config.session_header)
    }

    pub fn session_header(&self) -> &HeaderName {
        &self.session_header
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_message(
        &self,
        endpoint: &str,
        session_id: &SessionId,
        message: &str,
    ) -> Result<serde_json::Value, ExchangeError> {
        debug!(%endpoint, session = %session_id, "Webhook request");

        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(&self.session_header, session_id.as_str())
            .json(&WebhookPayload { message })
            .send()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| ExchangeError::Parse(e.to_string()))
    }
}
