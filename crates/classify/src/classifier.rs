use serde::Serialize;
use tracing::trace;

use crate::lexicon::{CategoryLexicon, OTHER};

/// Number of distinct triggers of one category found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore<'a> {
    pub category: &'a str,
    pub score: usize,
}

/// Scores every category of `lexicon` against `text`, in lexicon order.
///
/// A trigger counts once if it occurs anywhere in the lower-cased text,
/// including inside a longer word ("shopping" votes for "shop").
pub fn score<'a>(text: &str, lexicon: &'a CategoryLexicon) -> Vec<CategoryScore<'a>> {
    let lowered = text.to_lowercase();
    lexicon
        .entries()
        .iter()
        .map(|entry| CategoryScore {
            category: entry.name.as_str(),
            score: entry
                .triggers
                .iter()
                .filter(|t| lowered.contains(t.as_str()))
                .count(),
        })
        .collect()
}

/// Picks the single best category for `text`.
///
/// The highest score wins; on a tie the category declared first in the
/// lexicon wins. Blank text, or text where nothing matches, yields
/// [`OTHER`]. This is a pure function of `(text, lexicon)`.
pub fn classify<'a>(text: &str, lexicon: &'a CategoryLexicon) -> &'a str {
    if text.trim().is_empty() {
        return OTHER;
    }

    let mut best: Option<CategoryScore<'a>> = None;
    for candidate in score(text, lexicon) {
        // Strictly greater keeps the earliest category on ties.
        if candidate.score > best.map_or(0, |b| b.score) {
            best = Some(candidate);
        }
    }

    match best {
        Some(winner) => {
            trace!(category = winner.category, score = winner.score, "classified");
            winner.category
        }
        None => OTHER,
    }
}
