//! Error types for notex-session

use thiserror::Error;

/// Result type alias using notex-session Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while managing conversations
#[derive(Error, Debug)]
pub enum Error {
    /// Persisting state failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// User input was rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error from the backend client
    #[error(transparent)]
    Api(#[from] notex_api::Error),

    /// No conversation with the given id
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
}

/// Failures writing to the key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input rejected before an operation starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a YouTube link")]
    EmptyLink,

    #[error("Please enter a valid YouTube URL")]
    InvalidYoutubeUrl,

    #[error("Please select a .doc, .docx, or .pdf file")]
    UnsupportedFile,

    #[error("Could not read {path}: {reason}")]
    UnreadableFile { path: String, reason: String },

    #[error("Model name cannot be empty")]
    EmptyModel,
}
