//! End-to-end turns through NluEngine

use super::*;
use crate::bridge::{DocumentOptions, IntentEngine, IntentLoadReport};
use crate::entity::EntityValue;
use crate::error::NluError;

fn synonyms(id: &str, forms: &[&str]) -> SynonymEntry {
    SynonymEntry {
        id: id.to_string(),
        synonyms: forms.iter().map(|s| s.to_string()).collect(),
    }
}

fn restaurant_engine(config: EngineConfig) -> NluEngine {
    let mut engine = NluEngine::new(config);
    engine.load_system_entities();
    engine
        .add_synonyms(
            "city",
            &[
                synonyms("nyc", &["New York", "NYC"]),
                synonyms("paris", &["Paris"]),
            ],
        )
        .unwrap();

    let tagged = DocumentOptions::tagged();
    engine.add_document("book a table in {city}", "book_table", &tagged);
    engine.add_document("what is the weather in {city}", "weather", &tagged);
    engine
}

fn context_value<'a>(outcome: &'a TurnOutcome, slot: &str) -> Option<&'a EntityValue> {
    outcome.context.get(slot)
}

#[test]
fn test_single_turn() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let outcome = engine.process("s1", "Book a table in NYC for 4");

    assert_eq!(outcome.entities.len(), 2);
    assert_eq!(outcome.entities[0].entity_type, "city");
    assert_eq!(outcome.entities[0].raw_text, "NYC");
    assert_eq!(outcome.entities[0].position, 16);
    assert_eq!(outcome.entities[1].value, EntityValue::Integer(4));

    assert_eq!(outcome.intent.label.as_deref(), Some("book_table"));
    assert!(outcome.intent.score > 0.5);
    assert_eq!(outcome.scores.len(), 3);

    assert_eq!(context_value(&outcome, "city"), Some(&EntityValue::from("nyc")));
    assert_eq!(context_value(&outcome, "sys_number"), Some(&EntityValue::Integer(4)));
    assert_eq!(outcome.explicit_slots, vec!["city", "sys_number"]);
    assert!(outcome.missing_slots.is_empty());
    assert_eq!(outcome.stats.entities_found, 2);
    assert_eq!(outcome.stats.slots_carried, 0);
}

#[test]
fn test_context_carries_across_turns() {
    let mut engine = restaurant_engine(EngineConfig::default());
    engine.process("s1", "Book a table in NYC for 4");
    let outcome = engine.process("s1", "what about the weather");

    assert_eq!(outcome.intent.label.as_deref(), Some("weather"));
    assert!(outcome.entities.is_empty());
    assert!(outcome.explicit_slots.is_empty());
    assert_eq!(context_value(&outcome, "city"), Some(&EntityValue::from("nyc")));
    assert_eq!(outcome.stats.slots_carried, 2);
    assert!(outcome.missing_slots.is_empty());
}

#[test]
fn test_without_carry_context() {
    let config = EngineConfig {
        carry_context: false,
        ..EngineConfig::default()
    };
    let mut engine = restaurant_engine(config);
    engine.process("s1", "Book a table in NYC for 4");
    let outcome = engine.process("s1", "what about the weather");

    assert!(outcome.context.is_empty());
    assert_eq!(outcome.missing_slots, vec!["city"]);
    // Write-back replaced the stored entry
    assert!(engine.sessions().get("s1").unwrap().is_empty());
}

#[test]
fn test_placeholder_resolves_to_remembered_city() {
    let config = EngineConfig {
        placeholder: Some(EntityValue::from("it")),
        ..EngineConfig::default()
    };
    let mut engine = restaurant_engine(config);
    engine.add_synonyms("city", &[synonyms("it", &["there"])]).unwrap();

    engine.process("s1", "book a table in Paris");
    let outcome = engine.process("s1", "what is the weather there");

    assert!(outcome.explicit_slots.contains(&"city".to_string()));
    assert_eq!(context_value(&outcome, "city"), Some(&EntityValue::from("paris")));
}

#[test]
fn test_sessions_are_independent() {
    let mut engine = restaurant_engine(EngineConfig::default());
    engine.process("a", "book a table in Paris");
    let outcome = engine.process("b", "what is the weather");
    assert!(outcome.context.is_empty());
    assert_eq!(engine.stats().sessions, 1);
    assert!(engine.sessions().get("b").is_none());

    engine.process("b", "weather in NYC");
    assert_eq!(engine.stats().sessions, 2);

    assert!(engine.forget_session("a"));
    assert!(!engine.forget_session("a"));
    assert_eq!(engine.sessions().len(), 1);
}

#[test]
fn test_unmatched_turn_stores_nothing() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let outcome = engine.process("ghost", "hello there");
    assert!(outcome.entities.is_empty());
    assert!(outcome.context.is_empty());
    assert_eq!(engine.stats().sessions, 0);
}

#[test]
fn test_bracketed_email_keeps_raw_text() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let outcome = engine.process("s1", "mail root@[192.168.0.1] now");
    assert_eq!(outcome.entities.len(), 1);
    let email = &outcome.entities[0];
    assert_eq!(email.entity_type, "sys_email");
    assert_eq!(email.raw_text, "root@[192.168.0.1]");
    assert_eq!(email.position, 5);
    assert_eq!(email.value, EntityValue::from("root@[192.168.0.1]"));
}

#[test]
fn test_email_beats_number() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let outcome = engine.process("s1", "write to 42@mail.com");
    assert_eq!(outcome.entities.len(), 1);
    assert_eq!(outcome.entities[0].entity_type, "sys_email");
    assert_eq!(outcome.entities[0].value, EntityValue::from("42@mail.com"));
}

#[test]
fn test_synonyms_on_non_string_entity() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let err = engine
        .add_synonyms("sys_number", &[synonyms("one", &["uno"])])
        .unwrap_err();
    assert!(matches!(err, NluError::NotSynonyms { kind: "numeric", .. }));

    // Re-adding known forms is a no-op
    let added = engine.add_synonyms("city", &[synonyms("nyc", &["new york"])]).unwrap();
    assert_eq!(added, 0);
}

#[test]
fn test_expand_intent_label() {
    let mut engine = restaurant_engine(EngineConfig::default());
    let options = DocumentOptions {
        from_tagged_sentence: true,
        expand_intent: true,
        with_names: false,
    };
    engine.add_document("fly from {city} to {city}", "travel", &options);
    assert!(engine.classifier().labels().contains(&"travel~city".to_string()));
}

#[test]
fn test_agent_export_round() {
    let mut engine = NluEngine::default();
    engine.load_system_entities();
    let forms = engine
        .load_agent_entity(
            "@city",
            r#"{ "entries": [ { "value": "paris", "synonyms": ["Paris", "Paname"] } ] }"#,
        )
        .unwrap();
    assert_eq!(forms, 2);

    let report = engine
        .load_agent_intent(
            "book_table",
            r#"{ "userSays": [
                { "data": [ { "text": "book a table in " }, { "text": "Paris", "meta": "@city" } ] },
                { "data": [ { "text": "table for " }, { "text": "4", "meta": "@sys.number" } ] },
                { "data": [ { "text": "lunch at " }, { "text": "noon", "meta": "@sys.time" } ] }
            ] }"#,
        )
        .unwrap();
    assert_eq!(report, IntentLoadReport { added: 2, skipped: 1 });

    let outcome = engine.process("s1", "table for 2 in Paname");
    assert_eq!(outcome.intent.label.as_deref(), Some("book_table"));
    assert_eq!(context_value(&outcome, "city"), Some(&EntityValue::from("paris")));
    assert_eq!(context_value(&outcome, "sys_number"), Some(&EntityValue::Integer(2)));
    assert!(outcome.missing_slots.is_empty());

    assert!(engine.has_entity("city"));
    assert!(matches!(
        engine.load_agent_entity("broken", "[1, 2"),
        Err(NluError::Export { .. })
    ));
}

#[test]
fn test_stats() {
    let engine = restaurant_engine(EngineConfig::default());
    let stats = engine.stats();
    assert_eq!(stats.entities, vec!["sys_number", "sys_email", "sys_any", "city"]);
    assert_eq!(stats.classifier.labels, 3);
    assert_eq!(stats.sessions, 0);
}
