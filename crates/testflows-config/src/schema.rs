//! Configuration schema types for testflows.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

/// Header carrying the session identifier on every webhook request.
pub const DEFAULT_SESSION_HEADER: &str = "X-Session-Id";

/// Sentinel message sent by the initialization probe.
pub const DEFAULT_INIT_MESSAGE: &str = "TEST_FLOW";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestflowsConfig {
    pub webhook: WebhookConfig,
    pub messages: MessagesConfig,
    pub logging: LoggingConfig,
}

/// Webhook endpoint and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Pre-filled endpoint. Empty means the user is prompted for one.
    pub url: String,
    pub session_header: String,
    pub init_message: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            session_header: DEFAULT_SESSION_HEADER.into(),
            init_message: DEFAULT_INIT_MESSAGE.into(),
        }
    }
}

/// User-facing strings appended to or shown with the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Assistant entry appended when an exchange fails.
    pub error_text: String,
    /// Assistant entry used when the webhook answers without a `message`.
    pub fallback_text: String,
    /// Shown while the conversation is still empty.
    pub empty_prompt: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            error_text: "Lo siento, ha ocurrido un error al procesar tu mensaje.".into(),
            fallback_text: "Error al obtener respuesta".into(),
            empty_prompt: "Escribe tu primer mensaje...".into(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
