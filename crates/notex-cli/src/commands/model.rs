//! /model command - list and switch models

use super::CommandResult;

/// Models the backend knows how to route
pub const KNOWN_MODELS: &[&str] = &["2.5 Flash", "Google Gemini"];

pub struct ModelCommand;

impl ModelCommand {
    /// Lists models with no args, otherwise switches. Unknown names are passed through.
    pub fn execute(args: &str, current_model: &str) -> CommandResult {
        if args.is_empty() {
            return CommandResult::Message(list_models(current_model));
        }

        let name = KNOWN_MODELS
            .iter()
            .find(|m| m.eq_ignore_ascii_case(args))
            .map(|m| m.to_string())
            .unwrap_or_else(|| args.to_string());
        CommandResult::ChangeModel(name)
    }
}

fn list_models(current: &str) -> String {
    let mut output = String::from("Available models:\n");
    for model in KNOWN_MODELS {
        let marker = if *model == current { " *" } else { "" };
        output.push_str(&format!("  {}{}\n", model, marker));
    }
    if !KNOWN_MODELS.contains(&current) {
        output.push_str(&format!("  {} * (custom)\n", current));
    }
    output.push_str("\nSwitch with: /model <name>");
    output
}
