//! The in-memory record of one session's exchange.

use testflows_common::ConversationEntry;

/// Ordered, append-only list of entries for the current session.
///
/// Entries are never edited once pushed; the only other mutation is
/// clearing the whole list when the session is replaced.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub(crate) fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testflows_common::Role;

    #[test]
    fn push_keeps_order() {
        let mut conversation = Conversation::new();
        conversation.push(ConversationEntry::user("ping"));
        conversation.push(ConversationEntry::assistant("pong"));

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.entries()[0].role(), Role::User);
        assert_eq!(conversation.last().unwrap().content(), "pong");
    }

    #[test]
    fn clear_empties() {
        let mut conversation = Conversation::new();
        conversation.push(ConversationEntry::user("ping"));
        conversation.clear();
        assert!(conversation.is_empty());
        assert!(conversation.last().is_none());
    }
}
