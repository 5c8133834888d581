//! Message exchange with the configured webhook.

mod chat;
mod reply;


pub use chat::Chat;
pub use reply::extract_reply;

/// A `send` that was refused before anything happened.
///
/// Exchange failures are never reported this way; they become an
/// assistant entry in the conversation instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("no webhook configured")]
    NotConfigured,
    #[error("message is empty")]
    EmptyMessage,
    #[error("another message is still waiting for a reply")]
    Busy,
}
