//! Orchestrates user actions into store updates and backend calls

use notex_api::Backend;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::{
    context::SessionContext,
    conversation::{Conversation, ConversationStore, ConversationSummary},
    error::{Error, Result, ValidationError},
    events::{OperationKind, SessionEvent},
    preferences::{Preferences, Theme},
    storage::Storage,
    validation::{validate_document_name, validate_youtube_link},
};

/// Result of a user-initiated operation that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The backend answered and the reply was appended
    Completed,
    /// The request failed; an error message was appended to the conversation
    Failed(String),
    /// Another operation is in flight; nothing was done
    Busy,
    /// Empty input; nothing was done
    Ignored,
}

/// Owns the session state and drives every user intent
pub struct InteractionController {
    store: ConversationStore,
    session: SessionContext,
    preferences: Preferences,
    backend: Arc<dyn Backend>,
    model: String,
    theme: Theme,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl InteractionController {
    /// Create a controller over persisted state
    pub fn new(storage: Storage, backend: Arc<dyn Backend>) -> Self {
        let preferences = Preferences::new(storage.clone());
        let (event_tx, _) = broadcast::channel(256);
        Self {
            store: ConversationStore::load(storage),
            session: SessionContext::new(),
            model: preferences.selected_model(),
            theme: preferences.theme(),
            preferences,
            backend,
            event_tx,
        }
    }

    /// Subscribe to controller events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn api_base_url(&self) -> &str {
        self.backend.base_url()
    }

    /// The active conversation, if it exists
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.session
            .active()
            .and_then(|id| self.store.find_conversation(id))
    }

    pub fn list_summaries(&self) -> impl Iterator<Item = ConversationSummary> + '_ {
        self.store.list_summaries(&self.session)
    }

    /// Plain-text export; defaults to the active conversation
    pub fn transcript(&self, id: Option<&str>) -> Option<String> {
        let id = id.or(self.session.active())?;
        self.store.transcript(id)
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }

    fn notice(&self, message: impl Into<String>) {
        self.emit(SessionEvent::Notice {
            message: message.into(),
        });
    }

    /// Append to the active conversation and announce it.
    ///
    /// A storage failure keeps the message in memory and is reported as a notice.
    fn append(&mut self, content: &str, is_user: bool) {
        if let Err(e) = self.store.append_message(&mut self.session, content, is_user) {
            tracing::warn!("Failed to persist conversations: {}", e);
            self.notice(format!("Warning: conversation could not be saved ({})", e));
        }

        let appended = self
            .active_conversation()
            .and_then(|c| c.messages.last().map(|m| (c.id.clone(), m.clone())));
        if let Some((conversation_id, message)) = appended {
            self.emit(SessionEvent::MessageAppended {
                conversation_id,
                message,
            });
        }
    }

    fn format_error(&self, kind: OperationKind, message: &str) -> String {
        let base = self.backend.base_url();
        let hints = match kind {
            OperationKind::Chat => format!(
                "• API is running at {}\n• API keys are configured correctly",
                base
            ),
            OperationKind::YoutubeSummary => format!(
                "• Your API is running at {}\n• The video has captions/subtitles available\n• Your API keys are configured correctly",
                base
            ),
            OperationKind::DocumentSummary => format!(
                "• Your API is running at {}\n• The file contains readable text\n• Your API keys are configured correctly",
                base
            ),
        };
        format!("❌ Error: {}\n\nPlease check:\n{}", message, hints)
    }

    /// Record the end of a request: reply or formatted error, plus the end event
    fn finish(&mut self, kind: OperationKind, result: std::result::Result<String, String>) -> Outcome {
        let outcome = match result {
            Ok(reply) => {
                self.append(&reply, false);
                if kind != OperationKind::Chat {
                    self.session.set_last_summary(reply);
                }
                Outcome::Completed
            }
            Err(message) => {
                tracing::warn!("{:?} failed: {}", kind, message);
                let formatted = self.format_error(kind, &message);
                self.append(&formatted, false);
                Outcome::Failed(message)
            }
        };

        self.emit(SessionEvent::OperationEnd {
            kind,
            success: outcome == Outcome::Completed,
        });
        outcome
    }

    /// Send a chat message, with the last summary as context
    pub async fn send_message(&mut self, text: &str) -> Result<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let Some(_guard) = self.session.begin_operation() else {
            return Ok(Outcome::Busy);
        };

        self.append(text, true);

        // The backend receives prior turns only
        let mut history = self.session.active_history(&self.store);
        history.pop();

        self.emit(SessionEvent::OperationStart {
            kind: OperationKind::Chat,
        });
        let result = self
            .backend
            .chat_completion(text, &history, &self.model, self.session.last_summary())
            .await;

        let result = match result {
            Ok(resp) => resp
                .reply()
                .map(str::to_string)
                .ok_or_else(|| "No response generated".to_string()),
            Err(e) => Err(e.user_message()),
        };

        Ok(self.finish(OperationKind::Chat, result))
    }

    /// Summarize a YouTube video. Non-YouTube links never reach the backend.
    pub async fn summarize_link(&mut self, link: &str) -> Result<Outcome> {
        let link = validate_youtube_link(link)?;

        let Some(_guard) = self.session.begin_operation() else {
            return Ok(Outcome::Busy);
        };

        self.append(&format!("📹 Summarizing YouTube video: {}", link), true);

        self.emit(SessionEvent::OperationStart {
            kind: OperationKind::YoutubeSummary,
        });
        let result = match self.backend.summarize_youtube(link, &self.model).await {
            Ok(resp) => resp
                .text()
                .map(str::to_string)
                .ok_or_else(|| "No summary generated".to_string()),
            Err(e) => Err(e.user_message()),
        };

        Ok(self.finish(OperationKind::YoutubeSummary, result))
    }

    /// Summarize document bytes. The name must carry an allowed extension.
    pub async fn upload_file(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<Outcome> {
        validate_document_name(file_name)?;

        let Some(_guard) = self.session.begin_operation() else {
            return Ok(Outcome::Busy);
        };

        self.append(&format!("📎 Summarizing file: {}", file_name), true);

        self.emit(SessionEvent::OperationStart {
            kind: OperationKind::DocumentSummary,
        });
        let result = match self
            .backend
            .summarize_document(bytes, file_name, &self.model)
            .await
        {
            Ok(resp) => resp
                .text()
                .map(str::to_string)
                .ok_or_else(|| "No summary generated".to_string()),
            Err(e) => Err(e.user_message()),
        };

        Ok(self.finish(OperationKind::DocumentSummary, result))
    }

    /// Read a file from disk and summarize it
    pub async fn upload_path(&mut self, path: &Path) -> Result<Outcome> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(ValidationError::UnsupportedFile)?
            .to_string();
        validate_document_name(&file_name)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ValidationError::UnreadableFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.upload_file(&file_name, bytes).await
    }

    /// Start a fresh session
    pub fn new_chat(&mut self) {
        self.store.start_new_conversation(&mut self.session);
        self.emit(SessionEvent::ActiveChanged {
            conversation_id: None,
        });
    }

    /// Switch to an existing conversation
    pub fn select_conversation(&mut self, id: &str) -> Result<()> {
        if !self.store.select_conversation(&mut self.session, id) {
            return Err(Error::ConversationNotFound(id.to_string()));
        }
        self.emit(SessionEvent::ActiveChanged {
            conversation_id: Some(id.to_string()),
        });
        Ok(())
    }

    /// Delete a conversation; deleting the active one starts a fresh session
    pub fn delete_conversation(&mut self, id: &str) -> Result<()> {
        let was_active = self.session.active() == Some(id);
        if !self.store.delete_conversation(&mut self.session, id)? {
            return Err(Error::ConversationNotFound(id.to_string()));
        }

        self.emit(SessionEvent::ConversationDeleted {
            conversation_id: id.to_string(),
        });
        if was_active {
            self.emit(SessionEvent::ActiveChanged {
                conversation_id: None,
            });
        }
        Ok(())
    }

    /// Choose the model sent with every request; persisted across restarts
    pub fn select_model(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyModel.into());
        }
        self.model = name.to_string();
        self.preferences.set_selected_model(name)?;
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.preferences.set_theme(theme)?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Reopen the most recent conversation, if it has messages
    pub fn restore_last_conversation(&mut self) -> bool {
        let Some(id) = self
            .store
            .conversations()
            .first()
            .filter(|c| !c.messages.is_empty())
            .map(|c| c.id.clone())
        else {
            return false;
        };
        self.session.set_active(id.clone());
        self.emit(SessionEvent::ActiveChanged {
            conversation_id: Some(id),
        });
        true
    }

    /// Probe the backend; announces a setup hint when it cannot be reached
    pub async fn check_health(&self) -> Option<serde_json::Value> {
        let status = self.backend.health().await;
        match &status {
            Some(payload) => tracing::info!("API connected: {}", payload),
            None => {
                tracing::warn!("API not available at {}", self.backend.base_url());
                self.notice(format!(
                    "⚠️ Backend API not detected\n\nTo use all features:\n1. Start the NoteX backend\n2. Configure its API keys\n3. Make sure it is reachable at {}",
                    self.backend.base_url()
                ));
            }
        }
        status
    }
}
