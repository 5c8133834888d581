use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Opaque token correlating every request of one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of fresh session identifiers.
///
/// Every configure/reset/reconfigure pulls exactly one id from the factory,
/// so a deterministic factory makes session transitions reproducible.
pub trait SessionIdFactory: Send + Sync {
    fn next_id(&self) -> SessionId;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdFactory;

impl SessionIdFactory for UuidIdFactory {
    fn next_id(&self) -> SessionId {
        SessionId::new()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, starting at 1.
#[derive(Debug)]
pub struct SequentialIdFactory {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl SessionIdFactory for SequentialIdFactory {
    fn next_id(&self) -> SessionId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        SessionId(format!("{}-{n}", self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn session_id_new() {
        let sid = SessionId::new();
        let parsed = uuid::Uuid::parse_str(sid.as_str());
        assert!(parsed.is_ok());
    }

    #[test]
    fn session_id_display() {
        let sid = SessionId::from_string("abc");
        assert_eq!(sid.to_string(), "abc");
        assert_eq!(sid.as_str(), "abc");
    }

    #[test]
    fn session_id_serialization() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, deserialized);
    }

    #[test]
    fn uuid_factory_never_repeats() {
        use std::collections::HashSet;
        let factory = UuidIdFactory;
        let ids: HashSet<_> = (0..100).map(|_| factory.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn sequential_factory_counts_up() {
        let factory = SequentialIdFactory::new("s");
        assert_eq!(factory.next_id().as_str(), "s-1");
        assert_eq!(factory.next_id().as_str(), "s-2");
        assert_eq!(factory.next_id().as_str(), "s-3");
    }
}
