use uuid::Uuid;

use crate::error::ConversationStoreError;
use crate::replay::Replay;
use crate::schema::{now_timestamp, Message, Role};

/// Append-only, in-memory transcript owned by one session context.
///
/// Messages are never edited or removed individually; [`ConversationStore::clear`]
/// drops all of them and issues a fresh session id.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    session_id: Uuid,
    messages: Vec<Message>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    /// Adds `message` at the end. Empty or whitespace-only content is rejected.
    pub fn append(&mut self, message: Message) -> Result<&Message, ConversationStoreError> {
        if message.content.trim().is_empty() {
            return Err(ConversationStoreError::EmptyContent {
                role: message.role.as_str(),
            });
        }

        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Stamps `content` with the current local time and appends it.
    pub fn push(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<&Message, ConversationStoreError> {
        let timestamp = now_timestamp()?;
        self.append(Message::new(role, content, timestamp))
    }

    #[must_use]
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(&self.messages)
    }

    pub fn clear(&mut self) {
        self.messages = Vec::new();
        self.session_id = Uuid::new_v4();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Serializes the transcript as a JSON array of messages.
    pub fn to_json(&self) -> Result<String, ConversationStoreError> {
        serde_json::to_string_pretty(&self.messages).map_err(ConversationStoreError::JsonSerialize)
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
