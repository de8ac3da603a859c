//! Counter store backing the classifier
//!
//! Three keyed counters plus the ordered label set. Counts only grow.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ClassifierStorage {
    /// stem -> label -> co-occurrence count
    stem_label: HashMap<String, HashMap<String, u64>>,
    /// stem -> occurrences across all labels
    stem_totals: HashMap<String, u64>,
    /// label -> trained documents
    label_docs: HashMap<String, u64>,
    /// Labels in first-seen order
    labels: Vec<String>,
}

impl ClassifierStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label; returns false if it was already known
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.has_label(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn increment_stem(&mut self, stem: &str, label: &str) {
        *self
            .stem_label
            .entry(stem.to_string())
            .or_default()
            .entry(label.to_string())
            .or_insert(0) += 1;
        *self.stem_totals.entry(stem.to_string()).or_insert(0) += 1;
    }

    pub fn increment_doc(&mut self, label: &str) {
        *self.label_docs.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn stem_label_count(&self, stem: &str, label: &str) -> u64 {
        self.stem_label
            .get(stem)
            .and_then(|per_label| per_label.get(label))
            .copied()
            .unwrap_or(0)
    }

    pub fn stem_total(&self, stem: &str) -> u64 {
        self.stem_totals.get(stem).copied().unwrap_or(0)
    }

    pub fn doc_count(&self, label: &str) -> u64 {
        self.label_docs.get(label).copied().unwrap_or(0)
    }

    pub fn total_docs(&self) -> u64 {
        self.label_docs.values().sum()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.stem_totals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s = ClassifierStorage::new();
        assert!(s.add_label("a"));
        assert!(!s.add_label("a"));
        s.increment_stem("rain", "a");
        s.increment_stem("rain", "a");
        s.increment_stem("rain", "b");
        s.increment_doc("a");

        assert_eq!(s.stem_label_count("rain", "a"), 2);
        assert_eq!(s.stem_label_count("rain", "b"), 1);
        assert_eq!(s.stem_label_count("snow", "a"), 0);
        assert_eq!(s.stem_total("rain"), 3);
        assert_eq!(s.doc_count("a"), 1);
        assert_eq!(s.doc_count("b"), 0);
        assert_eq!(s.total_docs(), 1);
        assert_eq!(s.vocabulary_size(), 1);
    }
}
