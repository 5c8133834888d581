//! SessionManager struct and lifecycle transitions.

use std::sync::Arc;

use testflows_common::{ConversationEntry, SessionId, SessionIdFactory, UuidIdFactory};
use tokio::sync::watch;
use tracing::info;

use crate::conversation::Conversation;

use super::types::SessionSnapshot;

/// Owns the session identifier, the webhook endpoint and the conversation.
pub struct SessionManager {
    ids: Arc<dyn SessionIdFactory>,
    session_id: SessionId,
    endpoint: String,
    configured: bool,
    conversation: Conversation,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl SessionManager {
    pub fn new(ids: Arc<dyn SessionIdFactory>) -> Self {
        let session_id = ids.next_id();
        let (state_tx, _) = watch::channel(SessionSnapshot {
            configured: false,
            endpoint: String::new(),
            session_id: session_id.clone(),
        });
        Self {
            ids,
            session_id,
            endpoint: String::new(),
            configured: false,
            conversation: Conversation::new(),
            state_tx,
        }
    }

    /// Accept `endpoint` and start a fresh session against it.
    ///
    /// Blank endpoints are rejected and leave the manager untouched.
    pub fn configure(&mut self, endpoint: &str) -> bool {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return false;
        }
        self.endpoint = endpoint.to_string();
        self.configured = true;
        self.conversation.clear();
        self.session_id = self.ids.next_id();
        info!(session = %self.session_id, endpoint = %self.endpoint, "Webhook configured");
        self.publish();
        true
    }

    /// New conversation against the same webhook.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.session_id = self.ids.next_id();
        info!(session = %self.session_id, "Session reset");
        self.publish();
    }

    /// Drop the webhook and go back to the unconfigured state.
    pub fn reconfigure(&mut self) {
        self.conversation.clear();
        self.session_id = self.ids.next_id();
        self.endpoint.clear();
        self.configured = false;
        info!(session = %self.session_id, "Session unconfigured");
        self.publish();
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            configured: self.configured,
            endpoint: self.endpoint.clone(),
            session_id: self.session_id.clone(),
        }
    }

    /// Observe session transitions. The current value is marked unseen.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        let mut rx = self.state_tx.subscribe();
        rx.mark_changed();
        rx
    }

    pub(crate) fn append(&mut self, entry: ConversationEntry) {
        self.conversation.push(entry);
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.snapshot());
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Arc::new(UuidIdFactory))
    }
}
