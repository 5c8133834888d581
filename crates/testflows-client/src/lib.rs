//! Webhook chat engine for testflows.
//!
//! Provides the session lifecycle and the message exchange with an
//! arbitrary HTTP webhook:
//! - Session management (configure / reset / reconfigure)
//! - Optimistic, failure-absorbing message exchange
//! - A fire-and-forget initialization probe driven by session changes
//! - A reqwest-backed transport behind the `WebhookTransport` trait

pub mod conversation;
pub mod exchange;
pub mod probe;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use conversation::Conversation;
pub use exchange::{extract_reply, Chat, ChatError};
pub use probe::{send_init_probe, ProbeReactor};
pub use session::{SessionManager, SessionSnapshot};
pub use transport::{ExchangeError, HttpTransport, WebhookPayload, WebhookTransport};

use testflows_config::TestflowsConfig;

/// Texts and sentinel used by the exchange.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Sentinel message sent by the initialization probe.
    pub init_message: String,
    /// Assistant entry appended when an exchange fails.
    pub error_text: String,
    /// Assistant entry used when the reply carries no `message`.
    pub fallback_text: String,
}

impl From<&TestflowsConfig> for ChatSettings {
    fn from(config: &TestflowsConfig) -> Self {
        Self {
            init_message: config.webhook.init_message.clone(),
            error_text: config.messages.error_text.clone(),
            fallback_text: config.messages.fallback_text.clone(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::from(&TestflowsConfig::default())
    }
}
