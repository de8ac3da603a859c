//! In-memory session storage
//!
//! Writes replace the whole entry for a session. Merging happens on the
//! read side in `get_effective_value`.

use std::collections::HashMap;

use super::context::{get_effective_value, SessionData, TurnResult};
use crate::entity::EntityValue;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SessionData>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<&SessionData> {
        self.sessions.get(session_id)
    }

    /// Overwrite the stored context for a session
    pub fn put(&mut self, session_id: &str, data: SessionData) {
        self.sessions.insert(session_id.to_string(), data);
    }

    pub fn remove(&mut self, session_id: &str) -> Option<SessionData> {
        self.sessions.remove(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Resolve `slots` for this turn and write the result back.
///
/// Slots without an effective value are left out and so dropped from storage.
/// A session gets an entry on its first turn with a slot value; until then
/// nothing is written.
pub fn merge_turn<'a>(
    store: &mut SessionStore,
    session_id: &str,
    turn: &TurnResult,
    slots: impl IntoIterator<Item = &'a str>,
    placeholder: Option<&EntityValue>,
) -> SessionData {
    let stored = store.get(session_id);
    if stored.is_none() && turn.is_empty() {
        return SessionData::new();
    }

    let mut context = SessionData::new();
    for slot in slots {
        if let Some(value) = get_effective_value(turn, slot, stored, placeholder) {
            context.insert(slot.to_string(), value);
        }
    }

    store.put(session_id, context.clone());
    context
}
