//! NumericRecognizer - bare integer literals

use regex::Regex;

use super::pattern::RegexRecognizer;
use super::types::{EntityMatch, EntityValue, Recognizer};

/// Digits starting on a word boundary; the run ends at the first non-digit,
/// so "12b" yields 12
const NUMBER_PATTERN: &str = r"\b\d+";

#[derive(Debug)]
pub struct NumericRecognizer {
    inner: RegexRecognizer,
}

impl NumericRecognizer {
    pub fn new(name: &str) -> Self {
        Self::with_priority(name, 0)
    }

    pub fn with_priority(name: &str, priority: i32) -> Self {
        let mut inner = RegexRecognizer::new(name);
        let regex = Regex::new(NUMBER_PATTERN).expect("number pattern compiles");
        // Literals that overflow i64 are rejected rather than clamped
        inner.add_regex(regex, priority, |raw, _| raw.parse::<i64>().ok().map(EntityValue::Integer));
        Self { inner }
    }
}

impl Recognizer for NumericRecognizer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>) {
        self.inner.recognize(text, out);
    }
}
