//! Session lifecycle.
//!
//! A `SessionManager` owns the session identifier, the configured webhook
//! and the conversation, and publishes every change of the
//! (configured, endpoint, session id) triple on a watch channel.

mod manager;
mod types;

pub use manager::SessionManager;
pub use types::SessionSnapshot;
pub(crate) use types::WaitingGuard;
