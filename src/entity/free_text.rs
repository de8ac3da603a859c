//! FreeTextRecognizer - quoted / free-form spans
//!
//! Does not scan on its own. A sequential matcher proposes a candidate span
//! (everything between two anchors of a pattern) and calls `expand()` to
//! refine it:
//!
//! 1. A quoted span yields its inner text verbatim
//! 2. Otherwise the earliest-registered matching prefix phrase is stripped
//! 3. Conjunction phrases are stripped from either end until nothing changes
//! 4. The text is truncated at the last sentence terminator
//!
//! Whitespace and punctuation are trimmed after every step.

use regex::Regex;

use super::types::{EntityMatch, EntityValue, Recognizer};
use crate::error::NluError;
use crate::text::{is_word_char, trim_span};

/// Quote pairs recognized around a free-text span
const QUOTES: &[(char, char)] = &[('"', '"'), ('\u{201C}', '\u{201D}')];

/// Start- and end-anchored forms of one conjunction phrase
#[derive(Clone, Debug)]
struct Conjunction {
    leading: Regex,
    trailing: Regex,
}

#[derive(Clone, Debug)]
pub struct FreeTextRecognizer {
    name: String,
    priority: i32,
    prefixes: Vec<Regex>,
    conjunctions: Vec<Conjunction>,
}

fn compile(pattern: String) -> Result<Regex, NluError> {
    Regex::new(&pattern).map_err(|source| NluError::Pattern { pattern, source })
}

/// `\b` is only meaningful next to a word character
fn edge_boundary(c: Option<char>) -> &'static str {
    match c {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    }
}

impl FreeTextRecognizer {
    pub fn new(name: &str) -> Self {
        Self::with_priority(name, 0)
    }

    pub fn with_priority(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            prefixes: Vec::new(),
            conjunctions: Vec::new(),
        }
    }

    /// Register a phrase stripped from the start of an unquoted span
    pub fn add_prefix(&mut self, phrase: &str) -> Result<(), NluError> {
        let phrase = phrase.trim();
        let regex = compile(format!(
            r"(?i)^\s*{}{}",
            regex::escape(phrase),
            edge_boundary(phrase.chars().next_back())
        ))?;
        self.prefixes.push(regex);
        Ok(())
    }

    /// Register a phrase stripped from either end of an unquoted span
    pub fn add_conjunction(&mut self, phrase: &str) -> Result<(), NluError> {
        let phrase = phrase.trim();
        let escaped = regex::escape(phrase);
        let leading = compile(format!(
            r"(?i)^\s*{}{}",
            escaped,
            edge_boundary(phrase.chars().next_back())
        ))?;
        let trailing = compile(format!(
            r"(?i){}{}\s*$",
            edge_boundary(phrase.chars().next()),
            escaped
        ))?;
        self.conjunctions.push(Conjunction { leading, trailing });
        Ok(())
    }

    /// Refine a candidate span. Returns `None` if nothing is left.
    pub fn expand(&self, candidate: &EntityMatch) -> Option<EntityMatch> {
        let raw = candidate.raw_text.as_str();

        if let Some((start, end)) = quoted_inner(raw) {
            return self.refined(candidate, start, end);
        }

        let (mut start, mut end) = trim_span(raw, 0, raw.len());

        if let Some(m) = self.prefixes.iter().find_map(|re| re.find(&raw[start..end])) {
            (start, end) = trim_span(raw, start + m.end(), end);
        }

        loop {
            let mut changed = false;
            for conj in &self.conjunctions {
                if let Some(m) = conj.leading.find(&raw[start..end]) {
                    if m.end() > 0 {
                        (start, end) = trim_span(raw, start + m.end(), end);
                        changed = true;
                    }
                }
                if let Some(m) = conj.trailing.find(&raw[start..end]) {
                    if m.start() < end - start {
                        (start, end) = trim_span(raw, start, start + m.start());
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }

        if let Some(i) = raw[start..end].rfind(|c: char| matches!(c, '.' | '!' | '?')) {
            (start, end) = trim_span(raw, start, start + i);
        }

        self.refined(candidate, start, end)
    }

    fn refined(&self, candidate: &EntityMatch, start: usize, end: usize) -> Option<EntityMatch> {
        if start >= end {
            return None;
        }
        let text = &candidate.raw_text[start..end];
        Some(EntityMatch::new(
            &self.name,
            text,
            candidate.position + start,
            EntityValue::from(text),
            self.priority,
        ))
    }
}

/// Inner byte range of a span wrapped in matching quotes
fn quoted_inner(raw: &str) -> Option<(usize, usize)> {
    let lead = raw.len() - raw.trim_start().len();
    let body = raw.trim();
    let first = body.chars().next()?;
    let last = body.chars().next_back()?;

    QUOTES
        .iter()
        .find(|&&(open, close)| first == open && last == close && body.len() > open.len_utf8())
        .map(|&(open, close)| (lead + open.len_utf8(), lead + body.len() - close.len_utf8()))
}

impl Recognizer for FreeTextRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    /// Free text is only ever produced through `expand`
    fn recognize(&self, _text: &str, _out: &mut Vec<EntityMatch>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder() -> FreeTextRecognizer {
        let mut rec = FreeTextRecognizer::new("reminder");
        rec.add_prefix("to").unwrap();
        rec.add_prefix("that").unwrap();
        rec.add_conjunction("and").unwrap();
        rec.add_conjunction("please").unwrap();
        rec
    }

    fn span(text: &str, position: usize) -> EntityMatch {
        EntityMatch::new("reminder", text, position, EntityValue::from(text), 0)
    }

    #[test]
    fn test_recognize_is_passive() {
        assert!(reminder().recognize_all("to buy milk").is_empty());
    }

    #[test]
    fn test_quoted_inner_text_verbatim() {
        let out = reminder().expand(&span(" \"to Buy  milk, and\" ", 10)).unwrap();
        assert_eq!(out.raw_text, "to Buy  milk, and");
        assert_eq!(out.value, EntityValue::from("to Buy  milk, and"));
        assert_eq!(out.position, 12);
    }

    #[test]
    fn test_prefix_conjunction_and_terminator() {
        let out = reminder().expand(&span(" to buy milk and eggs. please", 20)).unwrap();
        assert_eq!(out.raw_text, "buy milk and eggs");
        assert_eq!(out.position, 24);
    }

    #[test]
    fn test_conjunctions_stripped_repeatedly() {
        let out = reminder().expand(&span("and please call mom and please", 0)).unwrap();
        assert_eq!(out.raw_text, "call mom");
        assert_eq!(out.position, 11);
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        let out = reminder().expand(&span("tomorrow call mom", 0)).unwrap();
        assert_eq!(out.raw_text, "tomorrow call mom");
    }

    #[test]
    fn test_only_first_matching_prefix_is_stripped() {
        let out = reminder().expand(&span("to that end, rest", 0)).unwrap();
        assert_eq!(out.raw_text, "that end, rest");
    }

    #[test]
    fn test_nothing_left() {
        assert!(reminder().expand(&span(" and ", 0)).is_none());
        assert!(reminder().expand(&span("\"\"", 0)).is_none());
    }
}
