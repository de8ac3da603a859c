//! Turn-level slot values and the read-side merge rules
//!
//! A value stated in this turn wins. A placeholder (e.g. a pronoun
//! sentinel) defers to what the session already remembers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::{EntityMatch, EntityValue};

/// Slot values remembered for one session
pub type SessionData = BTreeMap<String, EntityValue>;

/// Slot values produced by the current turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnResult {
    slots: BTreeMap<String, EntityValue>,
}

impl TurnResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key accepted entities by type. The first match of a type wins.
    pub fn from_matches(matches: &[EntityMatch]) -> Self {
        let mut turn = Self::new();
        for m in matches {
            turn.slots
                .entry(m.entity_type.clone())
                .or_insert_with(|| m.value.clone());
        }
        turn
    }

    /// Builder-style slot setter
    pub fn with(mut self, slot: &str, value: impl Into<EntityValue>) -> Self {
        self.set(slot, value);
        self
    }

    pub fn set(&mut self, slot: &str, value: impl Into<EntityValue>) {
        self.slots.insert(slot.to_string(), value.into());
    }

    pub fn get(&self, slot: &str) -> Option<&EntityValue> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Value a slot should take after this turn
pub fn get_effective_value(
    turn: &TurnResult,
    slot: &str,
    stored: Option<&SessionData>,
    placeholder: Option<&EntityValue>,
) -> Option<EntityValue> {
    let remembered = stored.and_then(|data| data.get(slot));

    match turn.get(slot) {
        Some(value) if placeholder == Some(value) => remembered.or(Some(value)).cloned(),
        Some(value) => Some(value.clone()),
        None => remembered.cloned(),
    }
}

/// Whether the slot was stated in this turn, placeholder or not
pub fn is_explicit(turn: &TurnResult, slot: &str) -> bool {
    turn.get(slot).is_some()
}
