//! Serde schema of the agent export files

use serde::{Deserialize, Serialize};

/// One entity file: `{ entries: [{ value, synonyms }] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentEntity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entries: Vec<AgentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// One intent file: `{ userSays: [{ data: [...] }] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentIntent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "userSays", default)]
    pub user_says: Vec<AgentUtterance>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentUtterance {
    #[serde(default)]
    pub data: Vec<UtterancePart>,
}

/// A run of literal text, or an entity reference when `meta` is set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UtterancePart {
    #[serde(default)]
    pub text: Option<String>,
    /// Entity reference such as `@city` or `@sys.number`
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

/// Entity identifier as used in `{entity}` pattern tags.
///
/// Drops a leading `@`, lowercases, and replaces anything outside
/// `[a-z0-9:]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.strip_prefix('@')
        .unwrap_or(name)
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | ':' => c,
            _ => '_',
        })
        .collect()
}
