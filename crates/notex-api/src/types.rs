//! Wire types for the NoteX backend

use serde::{Deserialize, Serialize};

/// Speaker of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map the persisted `isUser` flag onto a role
    pub fn from_is_user(is_user: bool) -> Self {
        if is_user { Role::User } else { Role::Assistant }
    }
}

/// One prior turn sent along with a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [HistoryEntry],
    pub model: &'a str,
    /// Last summary, if any. Serialized as `null` when absent.
    pub context: Option<&'a str>,
}

/// Body of `POST /api/summarize/youtube`
#[derive(Debug, Clone, Serialize)]
pub struct YoutubeRequest<'a> {
    pub url: &'a str,
    pub model: &'a str,
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatResponse {
    /// The reply text, only when the backend reported success with a non-empty message
    pub fn reply(&self) -> Option<&str> {
        match self.message.as_deref() {
            Some(text) if self.success && !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Response of both summarize endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub summary: Option<String>,
}

impl SummaryResponse {
    /// The summary text, only when the backend reported success with a non-empty summary
    pub fn text(&self) -> Option<&str> {
        match self.summary.as_deref() {
            Some(text) if self.success && !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Error body returned with non-2xx statuses.
///
/// FastAPI validation failures put an array in `detail`, so it is kept loose.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn detail_str(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
    }
}
