//! EntityExtractor - pools candidates from many recognizers
//!
//! Every recognizer proposes independently; the pooled bag goes through the
//! same `resolve_conflicts` routine the regex recognizer uses.

use super::recognizer::EntityRecognizer;
use super::resolve::resolve_conflicts;
use super::types::{EntityMatch, Recognizer};

#[derive(Debug, Default)]
pub struct EntityExtractor {
    recognizers: Vec<EntityRecognizer>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recognizer, replacing any existing one with the same name
    pub fn add_recognizer(&mut self, recognizer: impl Into<EntityRecognizer>) {
        let recognizer = recognizer.into();
        match self.recognizers.iter().position(|r| r.name() == recognizer.name()) {
            Some(i) => {
                tracing::debug!(entity = recognizer.name(), kind = recognizer.kind(), "replacing recognizer");
                self.recognizers[i] = recognizer;
            }
            None => self.recognizers.push(recognizer),
        }
    }

    pub fn has_recognizer(&self, name: &str) -> bool {
        self.recognizers.iter().any(|r| r.name() == name)
    }

    pub fn recognizer(&self, name: &str) -> Option<&EntityRecognizer> {
        self.recognizers.iter().find(|r| r.name() == name)
    }

    pub fn recognizer_mut(&mut self, name: &str) -> Option<&mut EntityRecognizer> {
        self.recognizers.iter_mut().find(|r| r.name() == name)
    }

    pub fn recognizer_names(&self) -> Vec<&str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Accepted, non-overlapping entities for `text`, in text order.
    ///
    /// Spans are reported exactly as matched; only `expand` trims.
    pub fn extract(&self, text: &str) -> Vec<EntityMatch> {
        let mut candidates = Vec::new();
        for recognizer in &self.recognizers {
            recognizer.recognize(text, &mut candidates);
        }
        resolve_conflicts(candidates)
    }

    /// Refine a free-text span through the recognizer named by its entity type
    pub fn expand(&self, candidate: &EntityMatch) -> Option<EntityMatch> {
        self.recognizer(&candidate.entity_type)?
            .as_free_text()?
            .expand(candidate)
    }
}
