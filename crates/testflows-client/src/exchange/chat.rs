//! The chat: session lifecycle plus the user-facing send operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use testflows_common::{ChatEvent, ConversationEntry, EventBus, SessionIdFactory};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::conversation::Conversation;
use crate::probe::ProbeReactor;
use crate::session::{SessionManager, WaitingGuard};
use crate::transport::WebhookTransport;
use crate::ChatSettings;

use super::reply::extract_reply;
use super::ChatError;

/// A webhook conversation: session, pending input, and the exchange.
pub struct Chat {
    session: SessionManager,
    transport: Arc<dyn WebhookTransport>,
    settings: ChatSettings,
    /// Pending input draft.
    input: String,
    /// True while a send is waiting for the webhook.
    waiting: Arc<AtomicBool>,
    events: Arc<EventBus>,
}

impl Chat {
    pub fn new(transport: Arc<dyn WebhookTransport>, settings: ChatSettings) -> Self {
        Self {
            session: SessionManager::default(),
            transport,
            settings,
            input: String::new(),
            waiting: Arc::new(AtomicBool::new(false)),
            events: Arc::new(EventBus::default()),
        }
    }

    /// Replace the session id source. Starts over with a fresh, unconfigured session.
    pub fn with_id_factory(mut self, ids: Arc<dyn SessionIdFactory>) -> Self {
        self.session = SessionManager::new(ids);
        self
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    /// Start the task that sends the init probe for every new configured session.
    ///
    /// The task ends when the chat is dropped.
    pub fn spawn_probe_reactor(&self) -> JoinHandle<()> {
        ProbeReactor::new(
            Arc::clone(&self.transport),
            self.settings.init_message.clone(),
            self.session.subscribe(),
        )
        .spawn()
    }

    pub fn configure(&mut self, endpoint: &str) -> bool {
        if !self.session.configure(endpoint) {
            debug!("Rejected blank webhook endpoint");
            return false;
        }
        self.events.publish(ChatEvent::Configured {
            session_id: self.session.session_id().clone(),
        });
        true
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.input.clear();
        self.events.publish(ChatEvent::ConversationCleared {
            session_id: self.session.session_id().clone(),
        });
    }

    pub fn reconfigure(&mut self) {
        self.session.reconfigure();
        self.input.clear();
        self.events.publish(ChatEvent::Unconfigured);
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the send control should be enabled.
    pub fn can_send(&self) -> bool {
        self.session.is_configured() && !self.is_waiting() && !self.input.trim().is_empty()
    }

    /// Send the pending input draft.
    pub async fn submit(&mut self) -> Result<(), ChatError> {
        let text = self.input.clone();
        self.send(text).await
    }

    /// Send one user message and record the webhook's answer.
    ///
    /// Once the preconditions hold, the conversation always grows by one
    /// user entry and one assistant entry; webhook failures become the
    /// configured error text instead of an `Err`.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<(), ChatError> {
        let text = text.into();
        if !self.session.is_configured() {
            return Err(ChatError::NotConfigured);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        // Claimed before the user entry is recorded, announced after it.
        let mut waiting = WaitingGuard::acquire(&self.waiting, &self.events)?;

        self.append(ConversationEntry::user(text.as_str()));
        self.input.clear();
        waiting.announce();

        let endpoint = self.session.endpoint().to_string();
        let session_id = self.session.session_id().clone();

        let result = self
            .transport
            .post_message(&endpoint, &session_id, &text)
            .await
            .and_then(|body| {
                debug!(session = %session_id, %body, "Webhook response");
                extract_reply(&body, &self.settings.fallback_text)
            });

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!(session = %session_id, error = %e, "Webhook exchange failed");
                self.settings.error_text.clone()
            }
        };
        self.append(ConversationEntry::assistant(reply));
        Ok(())
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn conversation(&self) -> &Conversation {
        self.session.conversation()
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting.load(Ordering::Acquire)
    }

    /// Shared handle on the waiting flag, for UIs that poll it.
    pub fn waiting_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.waiting)
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    fn append(&mut self, entry: ConversationEntry) {
        self.session.append(entry.clone());
        self.events.publish(ChatEvent::EntryAppended(entry));
    }
}
