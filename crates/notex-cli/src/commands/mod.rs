//! Slash commands for interactive mode

mod conversations;
mod model;

pub use conversations::{ConversationsCommand, history_text, list_text};
pub use model::ModelCommand;

use notex_session::InteractionController;
use std::path::PathBuf;

/// Result of executing a slash command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Start a fresh session
    NewChat,
    /// Switch to a stored conversation
    Open(String),
    /// Delete a stored conversation
    Delete(String),
    /// Summarize a YouTube link
    Youtube(String),
    /// Summarize a local document
    Upload(PathBuf),
    /// Change the model
    ChangeModel(String),
    /// Flip between light and dark
    ToggleTheme,
    /// Show a message to the user (not sent to the backend)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse and execute a slash command
pub fn execute_command(input: &str, controller: &InteractionController) -> Option<CommandResult> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = input[1..].splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "new" | "n" => CommandResult::NewChat,

        "list" | "l" => ConversationsCommand::list(controller),

        "open" | "o" => require_arg(args, "/open <id>", |id| CommandResult::Open(id.to_string())),

        "delete" | "d" => {
            require_arg(args, "/delete <id>", |id| CommandResult::Delete(id.to_string()))
        }

        "youtube" | "yt" => {
            require_arg(args, "/youtube <url>", |url| CommandResult::Youtube(url.to_string()))
        }

        "upload" | "u" => {
            require_arg(args, "/upload <path>", |path| CommandResult::Upload(PathBuf::from(path)))
        }

        "model" | "m" => ModelCommand::execute(args, controller.model()),

        "theme" => CommandResult::ToggleTheme,

        "share" => ConversationsCommand::share(args, controller),

        "history" => ConversationsCommand::history(controller),

        "quit" | "exit" | "q" => CommandResult::Exit,

        _ => CommandResult::Unknown(command),
    })
}

fn require_arg(args: &str, usage: &str, f: impl FnOnce(&str) -> CommandResult) -> CommandResult {
    if args.is_empty() {
        CommandResult::Message(format!("Usage: {}", usage))
    } else {
        f(args)
    }
}

pub fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?         Show this help message
  /new, /n              Start a new chat
  /list, /l             List saved conversations
  /open, /o <id>        Continue a saved conversation
  /delete, /d <id>      Delete a saved conversation
  /youtube, /yt <url>   Summarize a YouTube video
  /upload, /u <path>    Summarize a .doc, .docx or .pdf file
  /model, /m [name]     List models or switch to a model
  /theme                Toggle light/dark theme
  /share [id]           Print a conversation as plain text
  /history              Show the active conversation
  /quit, /exit, /q      Exit notex

Anything else is sent as a chat message. After a summary, follow-up
questions are answered with that summary as context."#
        .to_string()
}
