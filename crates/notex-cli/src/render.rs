//! Terminal projection of controller events

use notex_session::{Outcome, SessionEvent, Theme};
use std::future::Future;
use tokio::sync::broadcast;

/// ANSI colours for the current theme; empty when output is not a terminal
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    accent: &'static str,
    dim: &'static str,
    reset: &'static str,
}

impl Palette {
    pub fn new(theme: Theme, color: bool) -> Self {
        if !color {
            return Self {
                accent: "",
                dim: "",
                reset: "",
            };
        }
        match theme {
            Theme::Light => Self {
                accent: "\x1b[34m",
                dim: "\x1b[90m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                accent: "\x1b[96m",
                dim: "\x1b[37m",
                reset: "\x1b[0m",
            },
        }
    }

    pub fn status(&self, text: &str) -> String {
        format!("{}[{}]{}", self.dim, text, self.reset)
    }
}

/// Text for an event, or `None` if the event has no terminal output.
///
/// User messages are not echoed; the user just typed them.
pub fn render_event(event: &SessionEvent, palette: &Palette) -> Option<String> {
    match event {
        SessionEvent::MessageAppended { message, .. } if !message.is_user => Some(format!(
            "{}NoteX:{} {}",
            palette.accent, palette.reset, message.content
        )),
        SessionEvent::OperationStart { kind } => Some(palette.status(kind.label())),
        SessionEvent::Notice { message } => Some(message.clone()),
        SessionEvent::ConversationDeleted { conversation_id } => {
            Some(palette.status(&format!("Deleted conversation {}", conversation_id)))
        }
        SessionEvent::ActiveChanged {
            conversation_id: Some(id),
        } => Some(palette.status(&format!("Opened conversation {}", id))),
        SessionEvent::ActiveChanged {
            conversation_id: None,
        } => Some(palette.status("New chat")),
        _ => None,
    }
}

fn print_event(event: &SessionEvent, palette: &Palette) {
    if let Some(text) = render_event(event, palette) {
        println!("{}\n", text);
    }
}

/// Await an operation, printing its events as they arrive
pub async fn drive<T>(
    operation: impl Future<Output = T>,
    receiver: &mut broadcast::Receiver<SessionEvent>,
    palette: &Palette,
) -> T {
    tokio::pin!(operation);
    loop {
        tokio::select! {
            output = &mut operation => {
                drain(receiver, palette);
                return output;
            }
            Ok(event) = receiver.recv() => print_event(&event, palette),
        }
    }
}

/// Print every event queued since the last drain
pub fn drain(receiver: &mut broadcast::Receiver<SessionEvent>, palette: &Palette) {
    loop {
        match receiver.try_recv() {
            Ok(event) => print_event(&event, palette),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                tracing::warn!("Dropped {} events", n);
            }
            Err(_) => break,
        }
    }
}

/// Report what an operation did beyond its events; `true` if it succeeded
pub fn report(result: notex_session::Result<Outcome>) -> bool {
    match result {
        Ok(Outcome::Completed) | Ok(Outcome::Ignored) => true,
        Ok(Outcome::Failed(_)) => false,
        Ok(Outcome::Busy) => {
            eprintln!("Another request is still running.");
            false
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}
