//! Token filters applied before classifier training and scoring

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Keep every token
    None,
    /// Drop template tokens (`{city}`) and short words
    #[default]
    Basic,
}

/// Configured token filter
#[derive(Clone, Copy, Debug)]
pub struct TokenFilter {
    kind: FilterKind,
    min_token_len: usize,
}

impl TokenFilter {
    pub fn new(kind: FilterKind, min_token_len: usize) -> Self {
        Self { kind, min_token_len }
    }

    pub fn keep(&self, token: &str) -> bool {
        match self.kind {
            FilterKind::None => true,
            FilterKind::Basic => {
                !token.starts_with('{') && token.chars().count() >= self.min_token_len
            }
        }
    }

    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().filter(|t| self.keep(t)).collect()
    }
}
