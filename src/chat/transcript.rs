//! The on-screen conversation: an append-only list of role-tagged messages.

use std::fmt;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("you"),
            Self::Model => f.write_str("tutor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

/// Chronological transcript. Messages are only ever appended, extended at
/// the tail, or the trailing empty reply dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
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

    /// Appends `fragment` to the trailing model message.
    ///
    /// Returns `false` (and changes nothing) if the last message is not a reply.
    pub fn append_to_reply(&mut self, fragment: &str) -> bool {
        match self.messages.last_mut() {
            Some(message) if message.role == Role::Model => {
                message.content.push_str(fragment);
                true
            }
            _ => false,
        }
    }

    /// Removes the trailing model message if it is still empty.
    pub fn discard_empty_reply(&mut self) -> bool {
        let is_empty_reply = self
            .messages
            .last()
            .is_some_and(|m| m.role == Role::Model && m.content.is_empty());
        if is_empty_reply {
            self.messages.pop();
        }
        is_empty_reply
    }
}
