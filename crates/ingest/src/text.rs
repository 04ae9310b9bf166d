//! Character-level helpers shared by the analysis stages.
//!
//! All limits in textlens are expressed in Unicode scalar values, not bytes,
//! so truncation never splits a code point.

/// Returns the prefix of `text` holding at most `max_chars` characters.
///
/// ```rust
/// use ingest::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("hi", 10), "hi");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Number of characters left after trimming surrounding whitespace.
pub fn trimmed_char_count(text: &str) -> usize {
    text.trim().chars().count()
}

/// True when `text` is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
