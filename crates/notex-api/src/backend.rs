//! The backend contract the session layer talks to

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{ChatResponse, HistoryEntry, SummaryResponse},
};

/// Fallback messages used when an error response carries no `detail`
pub const CHAT_FALLBACK: &str = "Failed to get chat response";
pub const YOUTUBE_FALLBACK: &str = "Failed to summarize video";
pub const DOCUMENT_FALLBACK: &str = "Failed to summarize document";

/// A chat/summarization backend.
///
/// Each call is a single request/response exchange; nothing is retried.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask for a chat reply given prior turns and an optional summary context
    async fn chat_completion(
        &self,
        message: &str,
        history: &[HistoryEntry],
        model: &str,
        context: Option<&str>,
    ) -> Result<ChatResponse>;

    /// Summarize the transcript of a YouTube video
    async fn summarize_youtube(&self, url: &str, model: &str) -> Result<SummaryResponse>;

    /// Summarize an uploaded document
    async fn summarize_document(
        &self,
        file_bytes: Vec<u8>,
        file_name: &str,
        model: &str,
    ) -> Result<SummaryResponse>;

    /// Backend status payload, or `None` when the backend cannot be reached
    async fn health(&self) -> Option<serde_json::Value>;

    /// Base address, used in user-facing troubleshooting hints
    fn base_url(&self) -> &str;
}
