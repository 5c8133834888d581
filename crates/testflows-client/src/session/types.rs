//! Session snapshot and the waiting-flag guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use testflows_common::{ChatEvent, EventBus, SessionId};

use crate::exchange::ChatError;

/// The observable part of a session: what the probe reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub configured: bool,
    pub endpoint: String,
    pub session_id: SessionId,
}

impl SessionSnapshot {
    /// Configured with a usable endpoint.
    pub fn is_ready(&self) -> bool {
        self.configured && !self.endpoint.is_empty()
    }
}

/// Holds the `waiting` flag for the duration of one exchange.
///
/// The flag is cleared on drop, so it is released on every exit path,
/// including early returns and cancellation of the surrounding future.
/// `WaitingChanged` events are only published once the guard has been
/// announced.
pub(crate) struct WaitingGuard {
    flag: Arc<AtomicBool>,
    events: Arc<EventBus>,
    announced: bool,
}

impl WaitingGuard {
    /// Attempt to set the waiting flag. Returns `Err` if already waiting.
    pub(crate) fn acquire(flag: &Arc<AtomicBool>, events: &Arc<EventBus>) -> Result<Self, ChatError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ChatError::Busy);
        }
        Ok(Self {
            flag: Arc::clone(flag),
            events: Arc::clone(events),
            announced: false,
        })
    }

    /// Publish the transition into waiting.
    pub(crate) fn announce(&mut self) {
        if !self.announced {
            self.announced = true;
            self.events.publish(ChatEvent::WaitingChanged(true));
        }
    }
}

impl Drop for WaitingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        if self.announced {
            self.events.publish(ChatEvent::WaitingChanged(false));
        }
    }
}
