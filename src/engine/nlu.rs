//! NluEngine: one cross-boundary call per turn
//!
//! `process()` runs four phases:
//! 1. Entity extraction (pooled recognizers + conflict resolution)
//! 2. Intent classification
//! 3. Context merge against the session store
//! 4. Write-back of the merged context

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use wasm_bindgen::prelude::*;

use super::settings::EngineConfig;
use crate::bridge::{AgentAdapter, DocumentOptions, IntentEngine, IntentLoadReport};
use crate::classifier::{ClassifierStats, DocumentClassifier, Winner};
use crate::entity::{EntityExtractor, EntityMatch, EntityRecognizer, EntityValue, StringRecognizer};
use crate::error::{to_js, NluError};
use crate::session::{merge_turn, SessionData, SessionStore, TurnResult};

// =============================================================================
// Types
// =============================================================================

/// One canonical id and its surface forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub id: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Timing statistics for each turn phase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnTimings {
    pub total_us: u64,
    pub extract_us: u64,
    pub classify_us: u64,
    pub merge_us: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnStats {
    pub timings: TurnTimings,
    pub entities_found: usize,
    /// Context slots taken from memory rather than this turn
    pub slots_carried: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub entities: Vec<EntityMatch>,
    pub intent: Winner,
    pub scores: BTreeMap<String, f64>,
    /// Effective slot values after this turn
    pub context: SessionData,
    /// Slots stated in this turn
    pub explicit_slots: Vec<String>,
    /// Slots the winning intent was trained with that the context lacks
    pub missing_slots: Vec<String>,
    pub stats: TurnStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineStats {
    pub entities: Vec<String>,
    pub classifier: ClassifierStats,
    pub sessions: usize,
}

// =============================================================================
// NluEngine
// =============================================================================

#[wasm_bindgen]
pub struct NluEngine {
    config: EngineConfig,
    extractor: EntityExtractor,
    classifier: DocumentClassifier,
    sessions: SessionStore,
    /// label -> entity tags seen in its tagged training patterns
    intent_slots: HashMap<String, BTreeSet<String>>,
}

impl Default for NluEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[wasm_bindgen]
impl NluEngine {
    /// Create from an optional JS config object
    #[wasm_bindgen(constructor)]
    pub fn js_new(config: JsValue) -> Result<NluEngine, JsValue> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };
        Ok(Self::new(config))
    }

    /// entries should be an array of { id: string, synonyms: string[] }
    #[wasm_bindgen(js_name = addSynonyms)]
    pub fn js_add_synonyms(&mut self, entity: &str, entries: JsValue) -> Result<usize, JsValue> {
        let entries: Vec<SynonymEntry> = serde_wasm_bindgen::from_value(entries)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse synonyms: {}", e)))?;
        Ok(self.add_synonyms(entity, &entries)?)
    }

    #[wasm_bindgen(js_name = addDocument)]
    pub fn js_add_document(&mut self, pattern: &str, label: &str, options: JsValue) -> Result<(), JsValue> {
        let options: DocumentOptions = if options.is_undefined() || options.is_null() {
            DocumentOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
        };
        self.add_document(pattern, label, &options);
        Ok(())
    }

    #[wasm_bindgen(js_name = loadAgentEntity)]
    pub fn js_load_agent_entity(&mut self, name: &str, json: &str) -> Result<usize, JsValue> {
        Ok(AgentAdapter::new(self).load_entity(name, json)?)
    }

    #[wasm_bindgen(js_name = loadAgentIntent)]
    pub fn js_load_agent_intent(&mut self, name: &str, json: &str) -> Result<JsValue, JsValue> {
        let report = AgentAdapter::new(self).load_intent(name, json)?;
        to_js(&report)
    }

    #[wasm_bindgen(js_name = loadSystemEntities)]
    pub fn js_load_system_entities(&mut self) {
        AgentAdapter::new(self).load_system_entities();
    }

    #[wasm_bindgen(js_name = process)]
    pub fn js_process(&mut self, session_id: &str, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.process(session_id, text))
    }

    /// Refine `text` through the named free-text recognizer (null if nothing remains)
    #[wasm_bindgen(js_name = expandFreeText)]
    pub fn js_expand_free_text(&self, entity: &str, text: &str) -> Result<JsValue, JsValue> {
        let candidate = EntityMatch::new(entity, text, 0, EntityValue::from(text), 0);
        match self.extractor.expand(&candidate) {
            Some(refined) => to_js(&refined),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = forgetSession)]
    pub fn forget_session(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> JsValue {
        to_js(&self.stats()).unwrap_or(JsValue::NULL)
    }
}

impl NluEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            extractor: EntityExtractor::new(),
            classifier: DocumentClassifier::new(config.classifier.clone()),
            sessions: SessionStore::new(),
            intent_slots: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Register surface forms under a synonym entity, creating it on first use.
    ///
    /// Returns the number of new surface forms.
    pub fn add_synonyms(&mut self, entity: &str, entries: &[SynonymEntry]) -> Result<usize, NluError> {
        if !self.extractor.has_recognizer(entity) {
            self.extractor.add_recognizer(StringRecognizer::new(entity));
        }

        let recognizer = match self.extractor.recognizer_mut(entity) {
            Some(EntityRecognizer::String(r)) => r,
            Some(other) => {
                return Err(NluError::NotSynonyms {
                    name: entity.to_string(),
                    kind: other.kind(),
                })
            }
            None => return Ok(0),
        };

        let mut added = 0;
        for entry in entries {
            let surfaces = std::iter::once(&entry.id).chain(entry.synonyms.iter());
            for surface in surfaces {
                if recognizer.add_match(&entry.id, surface) {
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    /// Slots the winning intent was trained with, minus what the context holds
    fn missing_slots(&self, intent: &Winner, context: &SessionData) -> Vec<String> {
        intent
            .label
            .as_ref()
            .and_then(|label| self.intent_slots.get(label))
            .map(|slots| {
                slots
                    .iter()
                    .filter(|slot| !context.contains_key(slot.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Run one turn for `session_id`
    pub fn process(&mut self, session_id: &str, text: &str) -> TurnOutcome {
        let overall_start = instant::Instant::now();
        let mut outcome = TurnOutcome::default();

        // Phase 1: Entities
        let extract_start = instant::Instant::now();
        outcome.entities = self.extractor.extract(text);
        outcome.stats.timings.extract_us = extract_start.elapsed().as_micros() as u64;
        outcome.stats.entities_found = outcome.entities.len();

        // Phase 2: Intent
        let classify_start = instant::Instant::now();
        let classification = self.classifier.classify_document(text);
        outcome.intent = classification.winner;
        outcome.scores = classification.scores;
        outcome.stats.timings.classify_us = classify_start.elapsed().as_micros() as u64;

        // Phase 3 + 4: Merge and persist
        let merge_start = instant::Instant::now();
        let turn = TurnResult::from_matches(&outcome.entities);
        outcome.explicit_slots = turn.slots().map(str::to_string).collect();

        let mut slots: BTreeSet<String> = outcome.explicit_slots.iter().cloned().collect();
        if self.config.carry_context {
            if let Some(stored) = self.sessions.get(session_id) {
                slots.extend(stored.keys().cloned());
            }
        }

        outcome.context = merge_turn(
            &mut self.sessions,
            session_id,
            &turn,
            slots.iter().map(String::as_str),
            self.config.placeholder.as_ref(),
        );
        outcome.stats.slots_carried = outcome
            .context
            .keys()
            .filter(|slot| turn.get(slot.as_str()).is_none())
            .count();
        outcome.missing_slots = self.missing_slots(&outcome.intent, &outcome.context);
        outcome.stats.timings.merge_us = merge_start.elapsed().as_micros() as u64;

        outcome.stats.timings.total_us = overall_start.elapsed().as_micros() as u64;

        tracing::debug!(
            session = session_id,
            intent = ?outcome.intent.label,
            entities = outcome.stats.entities_found,
            total_us = outcome.stats.timings.total_us,
            "processed turn"
        );

        outcome
    }

    pub fn load_agent_entity(&mut self, name: &str, json: &str) -> Result<usize, NluError> {
        AgentAdapter::new(self).load_entity(name, json)
    }

    pub fn load_agent_intent(&mut self, name: &str, json: &str) -> Result<IntentLoadReport, NluError> {
        AgentAdapter::new(self).load_intent(name, json)
    }

    pub fn load_system_entities(&mut self) {
        AgentAdapter::new(self).load_system_entities();
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            entities: self
                .extractor
                .recognizer_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            classifier: self.classifier.stats(),
            sessions: self.sessions.len(),
        }
    }
}

impl IntentEngine for NluEngine {
    fn has_entity(&self, name: &str) -> bool {
        self.extractor.has_recognizer(name)
    }

    fn add_entity(&mut self, recognizer: EntityRecognizer) {
        self.extractor.add_recognizer(recognizer);
    }

    fn add_document(&mut self, pattern: &str, label: &str, options: &DocumentOptions) {
        if !options.from_tagged_sentence {
            self.classifier.add_document(pattern, label);
            return;
        }

        let tags = template_tags(pattern);
        let label = if options.expand_intent && !tags.is_empty() {
            let names: Vec<&str> = tags.iter().map(String::as_str).collect();
            format!("{}~{}", label, names.join("~"))
        } else {
            label.to_string()
        };

        if options.with_names {
            self.classifier.add_document(&untag(pattern), &label);
        } else {
            self.classifier.add_document(pattern, &label);
        }
        self.intent_slots.entry(label).or_default().extend(tags);
    }
}

// =============================================================================
// Pattern tags
// =============================================================================

/// Distinct `{entity}` tag names in a pattern, sorted
pub fn template_tags(pattern: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let tag = after[..close].trim();
                if !tag.is_empty() {
                    tags.insert(tag.to_string());
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    tags
}

/// Pattern with `{entity}` tags replaced by the bare entity names
fn untag(pattern: &str) -> String {
    pattern.replace(['{', '}'], " ")
}
