//! /list, /history and /share - read-only views of stored conversations

use notex_session::{InteractionController, utils::format_millis};

use super::CommandResult;

pub struct ConversationsCommand;

impl ConversationsCommand {
    /// Sidebar-style listing, newest first
    pub fn list(controller: &InteractionController) -> CommandResult {
        CommandResult::Message(list_text(controller))
    }

    /// Active conversation with timestamps
    pub fn history(controller: &InteractionController) -> CommandResult {
        CommandResult::Message(history_text(controller))
    }

    /// Plain-text export of a conversation (the active one if no id is given)
    pub fn share(args: &str, controller: &InteractionController) -> CommandResult {
        let id = (!args.is_empty()).then_some(args);
        match controller.transcript(id) {
            Some(text) => CommandResult::Message(text),
            None => match id {
                Some(id) => CommandResult::Message(format!("Conversation not found: {}", id)),
                None => CommandResult::Message("No active conversation to share.".to_string()),
            },
        }
    }
}

/// Render the conversation list. The active entry is marked with `*`.
pub fn list_text(controller: &InteractionController) -> String {
    let summaries: Vec<_> = controller.list_summaries().collect();
    if summaries.is_empty() {
        return "No conversations yet.".to_string();
    }

    let mut output = String::from("Conversations:\n");
    for summary in summaries {
        let marker = if summary.is_active { "*" } else { " " };
        let created = controller
            .store()
            .find_conversation(&summary.id)
            .map(|c| format_millis(c.created_at))
            .unwrap_or_default();
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            marker, summary.id, created, summary.title
        ));
    }
    output.push_str("\nOpen with: /open <id>");
    output
}

/// Render every message of the active conversation
pub fn history_text(controller: &InteractionController) -> String {
    let Some(conv) = controller.active_conversation() else {
        return "No active conversation.".to_string();
    };

    let mut output = format!("{} ({})\n", conv.title, conv.id);
    output.push_str(&"-".repeat(40));
    output.push('\n');
    for msg in &conv.messages {
        let who = if msg.is_user { "You" } else { "NoteX" };
        output.push_str(&format!(
            "[{}] {}: {}\n",
            format_millis(msg.timestamp),
            who,
            msg.content
        ));
    }
    output.trim_end().to_string()
}
