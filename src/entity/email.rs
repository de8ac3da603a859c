//! EmailRecognizer - conventional e-mail addresses
//!
//! Local part: dot-separated atoms, or a quoted string.
//! Domain: a bracketed IPv4 literal, or a dotted hostname with a TLD of 2+ letters.

use regex::Regex;

use super::pattern::RegexRecognizer;
use super::types::{EntityMatch, EntityValue, Recognizer};

const EMAIL_PATTERN: &str = concat!(
    r#"(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*|"[^"]+")"#,
    r"@",
    r"(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\]|(?:[a-z0-9\-]+\.)+[a-z]{2,})",
);

#[derive(Debug)]
pub struct EmailRecognizer {
    inner: RegexRecognizer,
}

impl EmailRecognizer {
    pub fn new(name: &str) -> Self {
        Self::with_priority(name, 0)
    }

    pub fn with_priority(name: &str, priority: i32) -> Self {
        let mut inner = RegexRecognizer::new(name);
        let regex = Regex::new(EMAIL_PATTERN).expect("email pattern compiles");
        inner.add_regex(regex, priority, |raw, _| Some(EntityValue::from(raw)));
        Self { inner }
    }
}

impl Recognizer for EmailRecognizer {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>) {
        self.inner.recognize(text, out);
    }
}
