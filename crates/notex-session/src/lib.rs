//! notex-session: conversation persistence and interaction control
//!
//! This crate keeps the conversation history in a key-value store, tracks the
//! running session (active conversation, last summary, in-flight flag) and turns
//! user intents into backend requests.

pub mod context;
pub mod controller;
pub mod conversation;
pub mod error;
pub mod events;
pub mod preferences;
pub mod storage;
pub mod utils;
pub mod validation;

pub use context::{OperationGuard, SessionContext};
pub use controller::{InteractionController, Outcome};
pub use conversation::{Conversation, ConversationStore, ConversationSummary, Message};
pub use error::{Error, Result, StorageError, ValidationError};
pub use events::{OperationKind, SessionEvent};
pub use preferences::{DEFAULT_MODEL, Preferences, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Storage};
