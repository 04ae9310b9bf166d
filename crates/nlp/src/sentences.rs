use unicode_segmentation::UnicodeSegmentation;

/// Splits `text` into trimmed, non-empty sentences (UAX #29 boundaries).
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Joins the first `count` sentences with single spaces.
///
/// Returns `None` when the text has no sentences at all.
pub fn leading_sentences(text: &str, count: usize) -> Option<String> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return None;
    }
    Some(
        sentences
            .into_iter()
            .take(count)
            .collect::<Vec<_>>()
            .join(" "),
    )
}
