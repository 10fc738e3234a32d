//! Conversation records and the store that keeps them in sync with storage

use serde::{Deserialize, Serialize};

use crate::{
    context::SessionContext,
    error::StorageError,
    storage::Storage,
    utils::{now_millis, truncate_chars},
};

/// Storage key holding the conversation list
pub const CONVERSATIONS_KEY: &str = "conversations";

/// Maximum characters of the first message used as a title
pub const TITLE_MAX_CHARS: usize = 40;

/// A single chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content: String,
    pub is_user: bool,
    #[serde(default)]
    pub timestamp: i64,
}

impl Message {
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            content: content.into(),
            is_user,
            timestamp: now_millis(),
        }
    }
}

/// A titled, ordered collection of messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Creation time (ms)
    #[serde(rename = "timestamp", default)]
    pub created_at: i64,
}

impl Conversation {
    fn new(id: String, first_message: &str) -> Self {
        Self {
            id,
            title: truncate_chars(first_message, TITLE_MAX_CHARS),
            messages: Vec::new(),
            created_at: now_millis(),
        }
    }
}

/// Row of the conversation list as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub is_active: bool,
}

/// In-memory conversation list, most recent first, persisted after every change
#[derive(Debug)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    storage: Storage,
}

impl ConversationStore {
    /// Load the persisted list. Absent or corrupt data yields an empty store.
    pub fn load(storage: Storage) -> Self {
        let conversations: Vec<Conversation> = storage.get(CONVERSATIONS_KEY, Vec::new());
        tracing::debug!("Loaded {} conversations", conversations.len());
        Self {
            conversations,
            storage,
        }
    }

    /// All conversations, most recent first
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Begin a fresh session. No record is created until the first message.
    pub fn start_new_conversation(&self, session: &mut SessionContext) {
        session.clear_active();
        session.clear_last_summary();
    }

    /// Make sure `session` points at an existing conversation, creating one titled
    /// after `first_message` at the head of the list when it does not.
    ///
    /// Creation is deferred to the first message so that no conversation is ever
    /// persisted without messages.
    pub fn ensure_active_conversation(
        &mut self,
        session: &mut SessionContext,
        first_message: &str,
    ) -> String {
        if let Some(id) = session.active() {
            if self.find_conversation(id).is_some() {
                return id.to_string();
            }
            tracing::debug!("Active conversation {} no longer exists", id);
        }

        let id = self.next_id();
        self.conversations
            .insert(0, Conversation::new(id.clone(), first_message));
        session.set_active(id.clone());
        tracing::debug!("Created conversation {}", id);
        id
    }

    /// Append a message to the active conversation, creating it if needed, then
    /// persist the whole list.
    ///
    /// The in-memory append is kept even when persisting fails.
    pub fn append_message(
        &mut self,
        session: &mut SessionContext,
        content: &str,
        is_user: bool,
    ) -> Result<(), StorageError> {
        let id = self.ensure_active_conversation(session, content);
        if let Some(conv) = self.conversations.iter_mut().find(|c| c.id == id) {
            conv.messages.push(Message::new(content, is_user));
        }
        self.persist()
    }

    pub fn find_conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Activate an existing conversation. Unknown ids leave the session untouched.
    pub fn select_conversation(&self, session: &mut SessionContext, id: &str) -> bool {
        if self.find_conversation(id).is_none() {
            return false;
        }
        session.set_active(id.to_string());
        true
    }

    /// Remove a conversation. Deleting the active one starts a new session.
    ///
    /// Returns whether anything was removed.
    pub fn delete_conversation(
        &mut self,
        session: &mut SessionContext,
        id: &str,
    ) -> Result<bool, StorageError> {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        let removed = self.conversations.len() != before;

        if session.active() == Some(id) {
            self.start_new_conversation(session);
        }

        if removed {
            tracing::debug!("Deleted conversation {}", id);
            self.persist()?;
        }
        Ok(removed)
    }

    /// Rows for the conversation list, in stored order.
    ///
    /// Each call reads the current state afresh.
    pub fn list_summaries<'a>(
        &'a self,
        session: &'a SessionContext,
    ) -> impl Iterator<Item = ConversationSummary> + 'a {
        let active = session.active();
        self.conversations.iter().map(move |c| ConversationSummary {
            id: c.id.clone(),
            title: c.title.clone(),
            is_active: active == Some(c.id.as_str()),
        })
    }

    /// Plain-text export of a conversation
    pub fn transcript(&self, id: &str) -> Option<String> {
        let conv = self.find_conversation(id)?;
        Some(
            conv.messages
                .iter()
                .map(|m| {
                    format!(
                        "{}: {}",
                        if m.is_user { "You" } else { "NoteX" },
                        m.content
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }

    /// Write the full list to storage
    pub fn persist(&self) -> Result<(), StorageError> {
        self.storage.set(CONVERSATIONS_KEY, &self.conversations)
    }

    /// Time-derived id, bumped until it does not collide with an existing one
    fn next_id(&self) -> String {
        let mut candidate = now_millis();
        while self
            .conversations
            .iter()
            .any(|c| c.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }
}
