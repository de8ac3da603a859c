//! RegexRecognizer - Pattern-derived entities
//!
//! Each registered pattern scans a lowercased, byte-aligned copy of the input.
//! A decoder turns a syntactic match into a value, or rejects it by returning
//! `None`. Candidates from all patterns then go through `resolve_conflicts`.

use regex::{Captures, Regex};
use std::fmt;

use super::resolve::resolve_conflicts;
use super::types::{EntityMatch, EntityValue, Recognizer};
use crate::error::NluError;
use crate::text::lower_aligned;

/// Decodes a match: receives the original matched text and the captures
/// taken over the lowercased copy
pub type Decoder = Box<dyn Fn(&str, &Captures<'_>) -> Option<EntityValue>>;

struct PatternRule {
    regex: Regex,
    decode: Decoder,
    priority: i32,
}

/// Ordered set of `(pattern, decoder, priority)` rules for one entity type
pub struct RegexRecognizer {
    name: String,
    rules: Vec<PatternRule>,
}

impl fmt::Debug for RegexRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexRecognizer")
            .field("name", &self.name)
            .field(
                "patterns",
                &self.rules.iter().map(|r| r.regex.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RegexRecognizer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
        }
    }

    /// Compile and register a pattern
    pub fn add_pattern<F>(&mut self, pattern: &str, priority: i32, decode: F) -> Result<(), NluError>
    where
        F: Fn(&str, &Captures<'_>) -> Option<EntityValue> + 'static,
    {
        let regex = Regex::new(pattern).map_err(|source| NluError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.add_regex(regex, priority, decode);
        Ok(())
    }

    /// Register an already-compiled pattern
    pub fn add_regex<F>(&mut self, regex: Regex, priority: i32, decode: F)
    where
        F: Fn(&str, &Captures<'_>) -> Option<EntityValue> + 'static,
    {
        self.rules.push(PatternRule {
            regex,
            decode: Box::new(decode),
            priority,
        });
    }

    pub fn pattern_count(&self) -> usize {
        self.rules.len()
    }

    /// All decoded candidates, unresolved
    pub fn candidates(&self, text: &str) -> Vec<EntityMatch> {
        let lowered = lower_aligned(text);
        let mut candidates = Vec::new();

        for rule in &self.rules {
            for caps in rule.regex.captures_iter(&lowered) {
                let whole = match caps.get(0) {
                    Some(m) => m,
                    None => continue,
                };
                let raw = match text.get(whole.range()) {
                    Some(raw) => raw,
                    None => continue,
                };
                if let Some(value) = (rule.decode)(raw, &caps) {
                    candidates.push(EntityMatch::new(&self.name, raw, whole.start(), value, rule.priority));
                }
            }
        }

        candidates
    }
}

impl Recognizer for RegexRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>) {
        out.extend(resolve_conflicts(self.candidates(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size_recognizer() -> RegexRecognizer {
        let mut rec = RegexRecognizer::new("size");
        rec.add_pattern(r"\b(small|medium|large)\b", 0, |_, caps| {
            caps.get(1).map(|m| EntityValue::from(m.as_str()))
        })
        .unwrap();
        rec.add_pattern(r"\bextra large\b", 0, |_, _| Some(EntityValue::from("xl")))
            .unwrap();
        rec
    }

    #[test]
    fn test_decoder_value_and_raw_text() {
        let matches = size_recognizer().recognize_all("One MEDIUM pizza");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_text, "MEDIUM");
        assert_eq!(matches[0].value, EntityValue::from("medium"));
        assert_eq!(matches[0].position, 4);
    }

    #[test]
    fn test_longer_coincident_pattern_wins() {
        // "extra large" starts before "large"; the overlapping "large" is dropped
        let matches = size_recognizer().recognize_all("an extra large one");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, EntityValue::from("xl"));
    }

    #[test]
    fn test_decoder_can_reject() {
        let mut rec = RegexRecognizer::new("even");
        rec.add_pattern(r"\d+", 0, |raw, _| {
            raw.parse::<i64>().ok().filter(|n| n % 2 == 0).map(EntityValue::Integer)
        })
        .unwrap();
        let matches = rec.recognize_all("1 2 3 4");
        let values: Vec<i64> = matches.iter().filter_map(|m| m.value.as_i64()).collect();
        assert_eq!(values, vec![2, 4]);
    }

    #[test]
    fn test_priority_breaks_ties_between_patterns() {
        let mut rec = RegexRecognizer::new("word");
        rec.add_pattern(r"\bred\b", 0, |_, _| Some(EntityValue::from("low"))).unwrap();
        rec.add_pattern(r"\bred\b", 3, |_, _| Some(EntityValue::from("high"))).unwrap();
        let matches = rec.recognize_all("red");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, EntityValue::from("high"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let mut rec = RegexRecognizer::new("bad");
        let err = rec.add_pattern("(unclosed", 0, |_, _| None).unwrap_err();
        assert!(matches!(err, NluError::Pattern { .. }));
        assert_eq!(rec.pattern_count(), 0);
    }
}
