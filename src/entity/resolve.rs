//! Conflict resolution over pooled candidate matches
//!
//! Candidates are ordered by position (ascending), matched length (descending)
//! and priority (descending), then greedily selected: a candidate is accepted
//! iff it starts at or after the end of the last accepted one. Earliest start
//! wins, then the longest span, then the highest priority.

use std::cmp::Ordering;

use super::types::EntityMatch;

/// Canonical candidate order
pub fn candidate_order(a: &EntityMatch, b: &EntityMatch) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| b.raw_text.len().cmp(&a.raw_text.len()))
        .then_with(|| b.priority.cmp(&a.priority))
}

/// Select the accepted, non-overlapping subset of `candidates`
pub fn resolve_conflicts(mut candidates: Vec<EntityMatch>) -> Vec<EntityMatch> {
    candidates.sort_by(candidate_order);

    let mut accepted = Vec::with_capacity(candidates.len());
    let mut last_end = 0;

    for candidate in candidates {
        if candidate.position >= last_end {
            last_end = candidate.end();
            accepted.push(candidate);
        }
    }

    accepted
}
