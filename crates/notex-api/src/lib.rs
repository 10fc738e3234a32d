//! notex-api: client for the NoteX chat and summarization backend
//!
//! The backend exposes four endpoints (chat, YouTube summary, document summary and
//! health). [`Backend`] describes that contract and [`ApiClient`] implements it over
//! HTTP.

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

pub use backend::Backend;
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::*;
