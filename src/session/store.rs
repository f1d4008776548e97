use crate::providers::types::message::Message;

/// Ordered transcript of the active session.
#[derive(Debug, Default, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Every message appended so far, in append order.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
