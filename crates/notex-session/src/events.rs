//! Events emitted by the interaction controller

use serde::{Deserialize, Serialize};

use crate::conversation::Message;

/// Kind of content-producing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Chat,
    YoutubeSummary,
    DocumentSummary,
}

impl OperationKind {
    /// Short label for status lines
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Chat => "Thinking...",
            OperationKind::YoutubeSummary => "Summarizing video...",
            OperationKind::DocumentSummary => "Summarizing document...",
        }
    }
}

/// Events a renderer can project onto the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A request was issued and is awaiting its response
    OperationStart { kind: OperationKind },

    /// The request finished, successfully or not
    OperationEnd { kind: OperationKind, success: bool },

    /// A message was appended to the conversation
    MessageAppended {
        conversation_id: String,
        message: Message,
    },

    /// The active conversation changed (`None` = fresh session)
    ActiveChanged { conversation_id: Option<String> },

    /// A conversation was removed
    ConversationDeleted { conversation_id: String },

    /// Informational line not stored in any conversation
    Notice { message: String },
}
