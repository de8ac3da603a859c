//! Entity match types and the common recognizer contract

use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== TYPE DEFINITIONS ====================

/// Decoded value carried by an entity match
///
/// Serialized untagged so JS callers see plain strings and numbers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EntityValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl EntityValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntityValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EntityValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for EntityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityValue::Integer(n) => write!(f, "{}", n),
            EntityValue::Decimal(x) => write!(f, "{}", x),
            EntityValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntityValue {
    fn from(s: &str) -> Self {
        EntityValue::Text(s.to_string())
    }
}

impl From<String> for EntityValue {
    fn from(s: String) -> Self {
        EntityValue::Text(s)
    }
}

impl From<i64> for EntityValue {
    fn from(n: i64) -> Self {
        EntityValue::Integer(n)
    }
}

impl From<f64> for EntityValue {
    fn from(x: f64) -> Self {
        EntityValue::Decimal(x)
    }
}

/// A single candidate (or accepted) entity
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EntityMatch {
    pub entity_type: String,
    /// Exact substring of the original text
    pub raw_text: String,
    /// Byte offset of `raw_text` in the original text
    pub position: usize,
    pub value: EntityValue,
    /// Tie-break weight for coincident matches
    pub priority: i32,
}

impl EntityMatch {
    pub fn new(
        entity_type: &str,
        raw_text: &str,
        position: usize,
        value: EntityValue,
        priority: i32,
    ) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            raw_text: raw_text.to_string(),
            position,
            value,
            priority,
        }
    }

    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.position + self.raw_text.len()
    }
}

// ==================== RECOGNIZER CONTRACT ====================

/// Turns raw text into candidate entity matches for one entity type
pub trait Recognizer {
    /// Entity type reported on every match
    fn name(&self) -> &str;

    /// Append candidate matches for `text` to `out`.
    ///
    /// Absence of a match is not an error: nothing is appended.
    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>);

    fn recognize_all(&self, text: &str) -> Vec<EntityMatch> {
        let mut out = Vec::new();
        self.recognize(text, &mut out);
        out
    }
}
