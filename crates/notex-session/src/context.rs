//! Per-client session state: active conversation, last summary, in-flight flag.

use notex_api::{HistoryEntry, Role};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::conversation::ConversationStore;

/// Mutable state describing the running session.
///
/// Exactly one exists per client; the interaction controller owns it and lends it
/// to the conversation store.
#[derive(Debug, Default)]
pub struct SessionContext {
    active_conversation_id: Option<String>,
    last_summary: Option<String>,
    busy: Arc<AtomicBool>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, id: String) {
        self.active_conversation_id = Some(id);
    }

    pub fn active(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    pub fn clear_active(&mut self) {
        self.active_conversation_id = None;
    }

    /// Prior turns of the active conversation in wire form.
    ///
    /// Empty when nothing is active or the active id no longer exists.
    pub fn active_history(&self, store: &ConversationStore) -> Vec<HistoryEntry> {
        self.active()
            .and_then(|id| store.find_conversation(id))
            .map(|conv| {
                conv.messages
                    .iter()
                    .map(|m| HistoryEntry {
                        role: Role::from_is_user(m.is_user),
                        content: m.content.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace the last summary (never merged)
    pub fn set_last_summary(&mut self, text: impl Into<String>) {
        self.last_summary = Some(text.into());
    }

    pub fn last_summary(&self) -> Option<&str> {
        self.last_summary.as_deref()
    }

    pub fn clear_last_summary(&mut self) {
        self.last_summary = None;
    }

    /// Mark an operation as in flight. Returns `false` if one already is.
    pub fn try_begin_operation(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn end_operation(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Like [`try_begin_operation`](Self::try_begin_operation), but the returned
    /// guard ends the operation when dropped.
    pub fn begin_operation(&self) -> Option<OperationGuard> {
        self.try_begin_operation().then(|| OperationGuard {
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Clears the busy flag on drop
#[derive(Debug)]
pub struct OperationGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
