//! StringRecognizer - Synonym matching via Aho-Corasick
//!
//! Registered surface forms are normalized with `clean` and matched against the
//! `clean` form of the input (`fold_compact`), so matching is case- and
//! punctuation-insensitive and whitespace runs don't matter. Positions are mapped
//! back, so `raw_text` is always a slice of the original.
//!
//! # Matching rules
//! - Longest surface form first (ties keep registration order)
//! - Whole words only
//! - A matched span is consumed: shorter forms can't re-match inside it, and a
//!   consumed neighbour counts as a word boundary

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::cell::OnceCell;
use std::collections::HashSet;

use super::types::{EntityMatch, EntityValue, Recognizer};
use crate::text::{clean, fold_compact, is_word_char};

// ==================== TYPE DEFINITIONS ====================

#[derive(Clone, Debug)]
struct SurfaceForm {
    id: String,
    text: String,
}

/// Compiled scan index over the non-empty surface forms
#[derive(Clone, Debug)]
struct SurfaceIndex {
    automaton: AhoCorasick,
    /// Pattern id -> entry index
    entry_of: Vec<usize>,
    /// Pattern ids, longest text first
    order: Vec<usize>,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Synonym recognizer: many surface forms map to one canonical id
#[derive(Clone, Debug)]
pub struct StringRecognizer {
    name: String,
    priority: i32,
    entries: Vec<SurfaceForm>,
    seen: HashSet<String>,
    /// Built on first scan after a registration
    index: OnceCell<Option<SurfaceIndex>>,
}

impl StringRecognizer {
    pub fn new(name: &str) -> Self {
        Self::with_priority(name, 0)
    }

    pub fn with_priority(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            entries: Vec::new(),
            seen: HashSet::new(),
            index: OnceCell::new(),
        }
    }

    /// Register `text` as a surface form of `id`.
    ///
    /// Returns false if the normalized form was already registered (the call
    /// is then a no-op, whatever the id).
    pub fn add_match(&mut self, id: &str, text: &str) -> bool {
        let normalized = clean(text);
        if !self.seen.insert(normalized.clone()) {
            return false;
        }

        self.entries.push(SurfaceForm {
            id: id.to_string(),
            text: normalized,
        });
        self.index = OnceCell::new();
        true
    }

    /// Number of registered surface forms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    fn index(&self) -> Option<&SurfaceIndex> {
        self.index.get_or_init(|| self.build_index()).as_ref()
    }

    fn build_index(&self) -> Option<SurfaceIndex> {
        let entry_of: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.text.is_empty())
            .map(|(i, _)| i)
            .collect();

        if entry_of.is_empty() {
            return None;
        }

        let patterns: Vec<&str> = entry_of.iter().map(|&i| self.entries[i].text.as_str()).collect();

        // Standard semantics: overlapping search needs every occurrence
        let automaton = match AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
        {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(recognizer = %self.name, error = %e, "surface index build failed");
                return None;
            }
        };

        let mut order: Vec<usize> = (0..patterns.len()).collect();
        order.sort_by(|&a, &b| patterns[b].len().cmp(&patterns[a].len()));

        tracing::debug!(recognizer = %self.name, patterns = patterns.len(), "surface index built");

        Some(SurfaceIndex {
            automaton,
            entry_of,
            order,
        })
    }
}

// ==================== SCANNING ====================

/// Byte ranges already claimed by a longer surface form
#[derive(Default)]
struct Consumed(Vec<(usize, usize)>);

impl Consumed {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.0.iter().any(|&(s, e)| start < e && s < end)
    }

    fn contains(&self, byte: usize) -> bool {
        self.0.iter().any(|&(s, e)| s <= byte && byte < e)
    }

    fn push(&mut self, start: usize, end: usize) {
        self.0.push((start, end));
    }
}

fn boundary_before(folded: &str, start: usize, consumed: &Consumed) -> bool {
    match folded[..start].chars().next_back() {
        None => true,
        Some(c) => !is_word_char(c) || consumed.contains(start - c.len_utf8()),
    }
}

fn boundary_after(folded: &str, end: usize, consumed: &Consumed) -> bool {
    match folded[end..].chars().next() {
        None => true,
        Some(c) => !is_word_char(c) || consumed.contains(end),
    }
}

impl Recognizer for StringRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn recognize(&self, text: &str, out: &mut Vec<EntityMatch>) {
        let index = match self.index() {
            Some(index) => index,
            None => return,
        };

        let compact = fold_compact(text);
        let folded = compact.text.as_str();

        // Every occurrence of every form, grouped per pattern in text order
        let mut hits: Vec<Vec<(usize, usize)>> = vec![Vec::new(); index.entry_of.len()];
        for m in index.automaton.find_overlapping_iter(folded) {
            hits[m.pattern().as_usize()].push((m.start(), m.end()));
        }

        let first_new = out.len();
        let mut consumed = Consumed::default();

        for &pid in &index.order {
            let entry = &self.entries[index.entry_of[pid]];
            for &(start, end) in &hits[pid] {
                if consumed.overlaps(start, end)
                    || !boundary_before(folded, start, &consumed)
                    || !boundary_after(folded, end, &consumed)
                {
                    continue;
                }

                let (raw_start, raw_end) = match compact.original_range(start, end) {
                    Some(range) => range,
                    None => continue,
                };
                let raw = match text.get(raw_start..raw_end) {
                    Some(raw) => raw,
                    None => continue,
                };

                consumed.push(start, end);
                out.push(EntityMatch::new(
                    &self.name,
                    raw,
                    raw_start,
                    EntityValue::Text(entry.id.clone()),
                    self.priority,
                ));
            }
        }

        out[first_new..].sort_by_key(|m| m.position);
    }
}

// ==================== TESTS ====================
