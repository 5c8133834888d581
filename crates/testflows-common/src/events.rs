use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::SessionId;
use crate::types::ConversationEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    Configured { session_id: SessionId },
    Unconfigured,
    ConversationCleared { session_id: SessionId },
    EntryAppended(ConversationEntry),
    WaitingChanged(bool),
}

pub struct EventBus {
    sender: broadcast::Sender<ChatEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ChatEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
