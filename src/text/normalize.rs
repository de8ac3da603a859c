//! Text normalization shared by every recognizer and the classifier
//!
//! Two families of helpers live here:
//! - `clean` / `tokenize` produce compact lowercase text for registration and training
//! - `fold_compact` produces the `clean` form of a text together with a map from
//!   every scratch byte back to the original, for recognizers matching cleaned forms
//! - `lower_aligned` produces a *byte-aligned* scratch copy, so a byte range found
//!   in the scratch copy is the same byte range in the original

// =============================================================================
// Character classes
// =============================================================================

/// Letters, digits and underscore
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters stripped from the edges of an entity span
#[inline]
pub fn is_trim_char(c: char) -> bool {
    !is_word_char(c)
}

/// Template tokens (`{city}`) keep their braces through `clean`
#[inline]
fn is_template_char(c: char) -> bool {
    c == '{' || c == '}'
}

/// Lowercase a single char without changing its UTF-8 width.
///
/// Characters whose lowercase form is longer (or a different width) are
/// returned unchanged, which keeps the aligned helpers byte-exact.
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
        _ => c,
    }
}

// =============================================================================
// Cleaning + tokenizing
// =============================================================================

/// Lowercase, replace punctuation with spaces, collapse whitespace, trim.
///
/// ```
/// assert_eq!(kittnlu::clean("  Hello,   World! "), "hello world");
/// ```
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if is_word_char(c) || is_template_char(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(fold_char(c));
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split cleaned text into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    clean(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Scratch copies
// =============================================================================

/// The `clean` form of a text, with offsets back into the original
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldedText {
    pub text: String,
    /// Original byte range behind each byte of `text`
    origin: Vec<(usize, usize)>,
}

impl FoldedText {
    /// Original byte range covered by `[start, end)` of the folded text
    pub fn original_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.origin.len() {
            return None;
        }
        Some((self.origin[start].0, self.origin[end - 1].1))
    }
}

/// Same output as `clean`, keeping track of where each byte came from.
///
/// A collapsed run of whitespace/punctuation maps to the whole run.
pub fn fold_compact(text: &str) -> FoldedText {
    let mut out = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    let mut gap: Option<(usize, usize)> = None;

    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        if is_word_char(c) || is_template_char(c) {
            if let Some(run) = gap.take() {
                if !out.is_empty() {
                    out.push(' ');
                    origin.push(run);
                }
            }
            let folded = fold_char(c);
            out.push(folded);
            origin.extend(std::iter::repeat((i, end)).take(folded.len_utf8()));
        } else {
            gap = Some(match gap {
                Some((start, _)) => (start, end),
                None => (i, end),
            });
        }
    }

    debug_assert_eq!(out.len(), origin.len());
    FoldedText { text: out, origin }
}

/// Lowercase only, preserving byte offsets and punctuation
pub fn lower_aligned(text: &str) -> String {
    let out: String = text.chars().map(fold_char).collect();
    debug_assert_eq!(out.len(), text.len());
    out
}

// =============================================================================
// Span trimming
// =============================================================================

/// Shrink `[start, end)` so it has no leading/trailing whitespace or punctuation.
///
/// Out-of-range or non-boundary spans are returned unchanged. A span made only
/// of trim characters collapses to an empty span at its end.
pub fn trim_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let slice = match text.get(start..end) {
        Some(s) => s,
        None => return (start, end),
    };

    let after_lead = slice.trim_start_matches(is_trim_char);
    let lead = slice.len() - after_lead.len();
    let kept = after_lead.trim_end_matches(is_trim_char);

    (start + lead, start + lead + kept.len())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_and_lowercases() {
        assert_eq!(clean("  New   YORK, city!! "), "new york city");
        assert_eq!(clean("don't"), "don t");
        assert_eq!(clean(""), "");
        assert_eq!(clean("?!"), "");
    }

    #[test]
    fn test_clean_keeps_template_tokens() {
        assert_eq!(clean("Book in {city}."), "book in {city}");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Hello, world: how ARE you?"), vec!["hello", "world", "how", "are", "you"]);
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_fold_compact_matches_clean() {
        for text in ["  New   YORK, city!! ", "Café—New-York!", "Book in {city}.", "", "?!"] {
            assert_eq!(fold_compact(text).text, clean(text));
        }
    }

    #[test]
    fn test_fold_compact_maps_back() {
        let text = "Fly to New ,  York!";
        let folded = fold_compact(text);
        let start = folded.text.find("new york").unwrap();
        let (s, e) = folded.original_range(start, start + 8).unwrap();
        assert_eq!(&text[s..e], "New ,  York");

        let text = "Café—Paris";
        let folded = fold_compact(text);
        assert_eq!(folded.text, "café paris");
        let (s, e) = folded.original_range(0, 5).unwrap();
        assert_eq!(&text[s..e], "Café");
        assert!(folded.original_range(3, 3).is_none());
        assert!(folded.original_range(0, 99).is_none());
    }

    #[test]
    fn test_lower_aligned_keeps_punctuation() {
        assert_eq!(lower_aligned("Mail A.B@X.Co"), "mail a.b@x.co");
    }

    #[test]
    fn test_fold_char_width_guard() {
        // U+0130 lowercases to two chars; it must stay put
        assert_eq!(fold_char('\u{130}'), '\u{130}');
        assert_eq!(fold_char('É'), 'é');
    }

    #[test]
    fn test_trim_span() {
        let text = "say  \"hello there\"!  ok";
        let (s, e) = trim_span(text, 3, 21);
        assert_eq!(&text[s..e], "hello there");

        let (s, e) = trim_span("...", 0, 3);
        assert_eq!(s, e);

        assert_eq!(trim_span("abc", 0, 10), (0, 10));
    }
}
