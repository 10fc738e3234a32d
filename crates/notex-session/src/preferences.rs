//! Persisted user preferences (theme and selected model)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{error::StorageError, storage::Storage};

pub const THEME_KEY: &str = "theme";
pub const SELECTED_MODEL_KEY: &str = "selectedModel";

/// Model used when none has been chosen
pub const DEFAULT_MODEL: &str = "2.5 Flash";

/// Colour scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Typed access to preference keys
#[derive(Debug, Clone)]
pub struct Preferences {
    storage: Storage,
}

impl Preferences {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> Theme {
        self.storage.get(THEME_KEY, Theme::default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, &theme)
    }

    pub fn selected_model(&self) -> String {
        let model: String = self.storage.get(SELECTED_MODEL_KEY, DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model
        }
    }

    pub fn set_selected_model(&self, model: &str) -> Result<(), StorageError> {
        self.storage.set(SELECTED_MODEL_KEY, model)
    }
}
