//! AgentAdapter: feeds parsed agent exports into an `IntentEngine`

use serde::{Deserialize, Serialize};

use super::schema::{sanitize_name, AgentEntity, AgentIntent, AgentUtterance};
use crate::entity::{
    EmailRecognizer, EntityRecognizer, FreeTextRecognizer, NumericRecognizer, Recognizer,
    StringRecognizer,
};
use crate::error::NluError;

// =============================================================================
// Engine contract
// =============================================================================

/// How `add_document` should read a training pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    /// Pattern contains `{entity}` tags
    pub from_tagged_sentence: bool,
    /// Suffix the label with the tagged entity names
    pub expand_intent: bool,
    /// Train on entity names in place of the tags
    pub with_names: bool,
}

impl DocumentOptions {
    pub fn tagged() -> Self {
        Self {
            from_tagged_sentence: true,
            ..Self::default()
        }
    }
}

/// What the adapter needs from an intent-matching engine
pub trait IntentEngine {
    fn has_entity(&self, name: &str) -> bool;
    fn add_entity(&mut self, recognizer: EntityRecognizer);
    fn add_document(&mut self, pattern: &str, label: &str, options: &DocumentOptions);
}

/// Outcome of loading one intent file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentLoadReport {
    pub added: usize,
    pub skipped: usize,
}

/// Names registered by `load_system_entities`
pub const SYS_NUMBER: &str = "sys_number";
pub const SYS_EMAIL: &str = "sys_email";
pub const SYS_ANY: &str = "sys_any";

// =============================================================================
// AgentAdapter
// =============================================================================

pub struct AgentAdapter<'e, E: IntentEngine> {
    engine: &'e mut E,
}

impl<'e, E: IntentEngine> AgentAdapter<'e, E> {
    pub fn new(engine: &'e mut E) -> Self {
        Self { engine }
    }

    /// Register one entity file as a synonym recognizer.
    ///
    /// Returns the number of surface forms registered.
    pub fn load_entity(&mut self, name: &str, json: &str) -> Result<usize, NluError> {
        let entity: AgentEntity = serde_json::from_str(json).map_err(|source| NluError::Export {
            name: name.to_string(),
            source,
        })?;
        Ok(self.add_entity(name, &entity))
    }

    pub fn add_entity(&mut self, name: &str, entity: &AgentEntity) -> usize {
        let mut recognizer = StringRecognizer::new(&sanitize_name(name));
        let mut forms = 0;
        for entry in &entity.entries {
            let surfaces = std::iter::once(&entry.value).chain(entry.synonyms.iter());
            for surface in surfaces {
                if recognizer.add_match(&entry.value, surface) {
                    forms += 1;
                }
            }
        }

        tracing::debug!(entity = recognizer.name(), forms, "loaded agent entity");
        self.engine.add_entity(recognizer.into());
        forms
    }

    /// Register every utterance of one intent file as a training pattern
    pub fn load_intent(&mut self, name: &str, json: &str) -> Result<IntentLoadReport, NluError> {
        let intent: AgentIntent = serde_json::from_str(json).map_err(|source| NluError::Export {
            name: name.to_string(),
            source,
        })?;
        Ok(self.add_intent(name, &intent))
    }

    pub fn add_intent(&mut self, name: &str, intent: &AgentIntent) -> IntentLoadReport {
        let mut report = IntentLoadReport::default();
        let options = DocumentOptions::tagged();

        for (i, utterance) in intent.user_says.iter().enumerate() {
            match self.pattern(utterance) {
                Ok(pattern) => {
                    self.engine.add_document(&pattern, name, &options);
                    report.added += 1;
                }
                Err(missing) => {
                    tracing::warn!(
                        intent = name,
                        utterance = i,
                        entity = %missing,
                        "skipping utterance that references an unknown entity"
                    );
                    report.skipped += 1;
                }
            }
        }

        tracing::debug!(intent = name, added = report.added, skipped = report.skipped, "loaded agent intent");
        report
    }

    /// Built-in numeric, e-mail and free-text entities
    pub fn load_system_entities(&mut self) {
        self.engine.add_entity(NumericRecognizer::new(SYS_NUMBER).into());
        self.engine.add_entity(EmailRecognizer::new(SYS_EMAIL).into());
        self.engine.add_entity(FreeTextRecognizer::new(SYS_ANY).into());
    }

    /// Tagged pattern for one utterance, or the first unknown entity name
    fn pattern(&self, utterance: &AgentUtterance) -> Result<String, String> {
        let mut pattern = String::new();
        for part in &utterance.data {
            match &part.meta {
                Some(meta) => {
                    let entity = sanitize_name(meta);
                    if !self.engine.has_entity(&entity) {
                        return Err(entity);
                    }
                    pattern.push('{');
                    pattern.push_str(&entity);
                    pattern.push('}');
                }
                None => pattern.push_str(part.text.as_deref().unwrap_or_default()),
            }
        }
        Ok(pattern.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockEngine {
        entities: Vec<EntityRecognizer>,
        documents: Vec<(String, String)>,
    }

    impl IntentEngine for MockEngine {
        fn has_entity(&self, name: &str) -> bool {
            self.entities.iter().any(|e| e.name() == name)
        }

        fn add_entity(&mut self, recognizer: EntityRecognizer) {
            self.entities.push(recognizer);
        }

        fn add_document(&mut self, pattern: &str, label: &str, options: &DocumentOptions) {
            assert!(options.from_tagged_sentence);
            self.documents.push((pattern.to_string(), label.to_string()));
        }
    }

    const CITY: &str = r#"{
        "name": "city",
        "entries": [
            { "value": "nyc", "synonyms": ["New York", "NYC", "new york"] },
            { "value": "paris", "synonyms": [] }
        ]
    }"#;

    const BOOK: &str = r#"{
        "userSays": [
            { "data": [ { "text": "book a table in " }, { "text": "Paris", "meta": "@city" } ] },
            { "data": [ { "text": "table for " }, { "text": "4", "meta": "@sys.number" } ] },
            { "data": [ { "text": "I want to eat at " }, { "text": "noon", "meta": "@sys.time" } ] }
        ]
    }"#;

    #[test]
    fn test_load_entity() {
        let mut engine = MockEngine::default();
        let forms = AgentAdapter::new(&mut engine).load_entity("@City", CITY).unwrap();

        // "NYC" and "new york" repeat earlier forms after cleaning
        assert_eq!(forms, 3);
        assert_eq!(engine.entities.len(), 1);
        assert_eq!(engine.entities[0].name(), "city");

        let found = engine.entities[0].recognize_all("flying to new york tomorrow");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value.as_str(), Some("nyc"));
    }

    #[test]
    fn test_load_intent_skips_unknown_entities() {
        let mut engine = MockEngine::default();
        let mut adapter = AgentAdapter::new(&mut engine);
        adapter.load_entity("city", CITY).unwrap();
        adapter.load_system_entities();
        let report = adapter.load_intent("book_table", BOOK).unwrap();

        assert_eq!(report, IntentLoadReport { added: 2, skipped: 1 });
        assert_eq!(
            engine.documents,
            vec![
                ("book a table in {city}".to_string(), "book_table".to_string()),
                ("table for {sys_number}".to_string(), "book_table".to_string()),
            ]
        );
    }

    #[test]
    fn test_system_entities() {
        let mut engine = MockEngine::default();
        AgentAdapter::new(&mut engine).load_system_entities();
        assert!(engine.has_entity(SYS_NUMBER));
        assert!(engine.has_entity(SYS_EMAIL));
        assert!(engine.has_entity(SYS_ANY));
    }

    #[test]
    fn test_malformed_export() {
        let mut engine = MockEngine::default();
        let err = AgentAdapter::new(&mut engine).load_intent("broken", "{ not json").unwrap_err();
        assert!(matches!(err, NluError::Export { ref name, .. } if name == "broken"));
        assert!(engine.documents.is_empty());
    }
}
