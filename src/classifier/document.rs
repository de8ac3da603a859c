//! DocumentClassifier: incrementally trainable multi-label intent classifier
//!
//! Each label is scored with a smoothed odds ratio over the stems it has
//! seen versus every other label combined. Per-token signals are blended
//! toward 0.5 by observation count, summed as log-odds and squashed back to
//! a probability.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

use super::config::ClassifierConfig;
use super::math::{blend, log_odds, logistic, ratio};
use super::storage::ClassifierStorage;
use crate::error::to_js;
use crate::text::{tokenize, TokenFilter};

// =============================================================================
// Types
// =============================================================================

/// Arg-max label. `label` stays `None` when no label scores above 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub label: Option<String>,
    pub score: f64,
}

impl Default for Winner {
    fn default() -> Self {
        Self { label: None, score: 0.0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    pub scores: BTreeMap<String, f64>,
    pub winner: Winner,
}

impl Classification {
    pub fn score(&self, label: &str) -> Option<f64> {
        self.scores.get(label).copied()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierStats {
    pub labels: usize,
    pub documents: u64,
    pub vocabulary: usize,
}

// =============================================================================
// DocumentClassifier
// =============================================================================

#[wasm_bindgen]
pub struct DocumentClassifier {
    config: ClassifierConfig,
    filter: TokenFilter,
    storage: ClassifierStorage,
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[wasm_bindgen]
impl DocumentClassifier {
    /// Create from an optional JS config object
    #[wasm_bindgen(constructor)]
    pub fn js_new(config: JsValue) -> Result<DocumentClassifier, JsValue> {
        let config: ClassifierConfig = if config.is_undefined() || config.is_null() {
            ClassifierConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        Ok(Self::new(config))
    }

    #[wasm_bindgen(js_name = addDocument)]
    pub fn js_add_document(&mut self, text: &str, label: &str) -> usize {
        self.add_document(text, label)
    }

    #[wasm_bindgen(js_name = classifyDocument)]
    pub fn js_classify_document(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.classify_document(text))
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> JsValue {
        to_js(&self.stats()).unwrap_or(JsValue::NULL)
    }
}

impl DocumentClassifier {
    /// New classifier, already trained on the implicit empty document
    pub fn new(config: ClassifierConfig) -> Self {
        let filter = config.token_filter();
        let none_label = config.none_label.clone();
        let mut classifier = Self {
            config,
            filter,
            storage: ClassifierStorage::new(),
        };
        classifier.add_document("", &none_label);
        classifier
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// tokenize -> filter -> stem
    pub fn stems(&self, text: &str) -> Vec<String> {
        self.filter
            .apply(tokenize(text))
            .iter()
            .map(|token| self.config.stemmer.apply(token))
            .collect()
    }

    /// Train one document. Returns the number of stems counted.
    pub fn add_document(&mut self, text: &str, label: &str) -> usize {
        if self.storage.add_label(label) {
            tracing::debug!(label, "new classifier label");
        }

        let stems = self.stems(text);
        for stem in &stems {
            self.storage.increment_stem(stem, label);
        }
        self.storage.increment_doc(label);

        tracing::debug!(label, stems = stems.len(), "trained document");
        stems.len()
    }

    pub fn classify_document(&self, text: &str) -> Classification {
        let stems = self.stems(text);
        let all_docs = self.storage.total_docs();

        let mut scores = BTreeMap::new();
        let mut ranked = Vec::with_capacity(self.storage.labels().len());

        for label in self.storage.labels() {
            let score = self.score_label(&stems, label, all_docs);
            scores.insert(label.clone(), score);
            ranked.push((label.as_str(), score));
        }

        Classification {
            scores,
            winner: pick_winner(ranked),
        }
    }

    fn score_label(&self, stems: &[String], label: &str, all_docs: u64) -> f64 {
        let docs = self.storage.doc_count(label);
        let other_docs = all_docs.saturating_sub(docs);

        let mut log_sum = 0.0;
        for stem in stems {
            let seen = self.storage.stem_total(stem);
            if seen == 0 {
                continue;
            }
            let in_label = self.storage.stem_label_count(stem, label);
            let p = ratio(in_label, docs);
            let q = ratio(seen - in_label, other_docs);
            if p + q <= 0.0 {
                continue;
            }
            log_sum += log_odds(blend(p / (p + q), seen));
        }

        logistic(log_sum)
    }

    pub fn labels(&self) -> &[String] {
        self.storage.labels()
    }

    pub fn storage(&self) -> &ClassifierStorage {
        &self.storage
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            labels: self.storage.labels().len(),
            documents: self.storage.total_docs(),
            vocabulary: self.storage.vocabulary_size(),
        }
    }
}

/// Strict `>` from 0 in label order: ties go to the first-seen label
fn pick_winner<'a>(ranked: impl IntoIterator<Item = (&'a str, f64)>) -> Winner {
    let mut winner = Winner::default();
    for (label, score) in ranked {
        if score > winner.score {
            winner = Winner {
                label: Some(label.to_string()),
                score,
            };
        }
    }
    winner
}
