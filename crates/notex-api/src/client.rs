//! reqwest implementation of the NoteX backend contract

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::{
    backend::{Backend, CHAT_FALLBACK, DOCUMENT_FALLBACK, YOUTUBE_FALLBACK},
    error::{Error, Result},
    types::{ChatRequest, ChatResponse, ErrorBody, HistoryEntry, SummaryResponse, YoutubeRequest},
};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client for the NoteX backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base address (`http://` or `https://`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));
        if host.is_none_or(str::is_empty) {
            return Err(Error::InvalidUrl(base_url));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    /// Create a client against `http://localhost:8000`
    pub fn local() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a response, mapping non-2xx statuses to `Error::Request`
async fn decode<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let detail = body.detail_str().unwrap_or(fallback);
        tracing::warn!("Backend returned {}: {}", status, detail);
        return Err(Error::request(detail));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Content type for the document part, based on the file extension
fn document_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn chat_completion(
        &self,
        message: &str,
        history: &[HistoryEntry],
        model: &str,
        context: Option<&str>,
    ) -> Result<ChatResponse> {
        let request = ChatRequest {
            message,
            history,
            model,
            context,
        };
        tracing::debug!(
            "POST /api/chat ({} history entries, context: {})",
            history.len(),
            context.is_some()
        );

        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await?;

        decode(response, CHAT_FALLBACK).await
    }

    async fn summarize_youtube(&self, url: &str, model: &str) -> Result<SummaryResponse> {
        tracing::debug!("POST /api/summarize/youtube {}", url);

        let response = self
            .client
            .post(self.url("/api/summarize/youtube"))
            .json(&YoutubeRequest { url, model })
            .send()
            .await?;

        decode(response, YOUTUBE_FALLBACK).await
    }

    async fn summarize_document(
        &self,
        file_bytes: Vec<u8>,
        file_name: &str,
        model: &str,
    ) -> Result<SummaryResponse> {
        tracing::debug!(
            "POST /api/summarize/document {} ({} bytes)",
            file_name,
            file_bytes.len()
        );

        let part = Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(document_mime(file_name))?;
        let form = Form::new()
            .part("file", part)
            .text("model", model.to_string());

        let response = self
            .client
            .post(self.url("/api/summarize/document"))
            .multipart(form)
            .send()
            .await?;

        decode(response, DOCUMENT_FALLBACK).await
    }

    async fn health(&self) -> Option<serde_json::Value> {
        let response = match self.client.get(self.url("/api/health")).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                return None;
            }
        };

        match response.json::<serde_json::Value>().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::debug!("Health check returned unreadable body: {}", e);
                None
            }
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
