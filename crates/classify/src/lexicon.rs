//! Category lexicon: the ordered table the classifier scores against.
//!
//! # Ordering
//!
//! Entry order is part of the classifier's contract. When two categories
//! reach the same score, the one declared first wins, so a lexicon is an
//! ordered `Vec`, never a map. YAML overrides are written as a list for the
//! same reason.
//!
//! # Examples
//!
//! ```rust
//! use classify::{CategoryEntry, CategoryLexicon};
//!
//! let lexicon = CategoryLexicon::new(vec![
//!     CategoryEntry::new("Cooking", ["recipe", "oven", "bake"]),
//!     CategoryEntry::new("Travel", ["flight", "hotel"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(lexicon.categories(), vec!["Cooking", "Travel", "Other"]);
//! ```
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// Label returned when no category scores above zero.
pub const OTHER: &str = "Other";

/// Built-in lexicon, in tie-break order.
pub const DEFAULT_LEXICON: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "software",
            "programming",
            "code",
            "tech",
            "computer",
            "api",
            "developer",
            "github",
            "python",
            "javascript",
        ],
    ),
    (
        "News",
        &[
            "news", "article", "report", "breaking", "update", "media", "press",
        ],
    ),
    (
        "Education",
        &[
            "learn",
            "tutorial",
            "course",
            "education",
            "study",
            "school",
            "university",
            "training",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "music",
            "video",
            "game",
            "entertainment",
            "show",
            "series",
            "film",
        ],
    ),
    (
        "Business",
        &[
            "business",
            "finance",
            "market",
            "stock",
            "company",
            "corporate",
            "startup",
            "investment",
        ],
    ),
    (
        "Social",
        &[
            "social",
            "facebook",
            "twitter",
            "instagram",
            "linkedin",
            "network",
            "community",
        ],
    ),
    (
        "Shopping",
        &[
            "shop", "buy", "purchase", "store", "product", "price", "cart", "amazon",
        ],
    ),
    (
        "Health",
        &[
            "health", "medical", "fitness", "wellness", "doctor", "medicine", "exercise",
        ],
    ),
    (
        "Science",
        &[
            "science",
            "research",
            "study",
            "experiment",
            "data",
            "analysis",
            "academic",
        ],
    ),
];

/// One category and the substrings that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub triggers: Vec<String>,
}

impl CategoryEntry {
    pub fn new<I, S>(name: impl Into<String>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validated, immutable category table.
///
/// Triggers are stored lower-cased so scoring only has to lower-case the
/// input text once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLexicon {
    entries: Vec<CategoryEntry>,
}

impl CategoryLexicon {
    /// Validates and normalizes `entries`, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`LexiconError::Empty`] when no entries are given
    /// - [`LexiconError::BlankName`] / [`LexiconError::ReservedName`] /
    ///   [`LexiconError::DuplicateCategory`] for bad names
    /// - [`LexiconError::NoTriggers`] / [`LexiconError::BlankTrigger`] for bad triggers
    pub fn new(entries: Vec<CategoryEntry>) -> Result<Self, LexiconError> {
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        let mut normalized = Vec::with_capacity(entries.len());

        for entry in entries {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(LexiconError::BlankName);
            }
            if name == OTHER {
                return Err(LexiconError::ReservedName(name));
            }
            if !seen.insert(name.clone()) {
                return Err(LexiconError::DuplicateCategory(name));
            }
            if entry.triggers.is_empty() {
                return Err(LexiconError::NoTriggers(name));
            }

            let mut triggers = Vec::with_capacity(entry.triggers.len());
            for trigger in entry.triggers {
                let trigger = trigger.trim().to_lowercase();
                if trigger.is_empty() {
                    return Err(LexiconError::BlankTrigger(name));
                }
                if !triggers.contains(&trigger) {
                    triggers.push(trigger);
                }
            }

            normalized.push(CategoryEntry { name, triggers });
        }

        Ok(Self {
            entries: normalized,
        })
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in declaration order, followed by [`OTHER`].
    pub fn categories(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.name.as_str())
            .chain(std::iter::once(OTHER))
            .collect()
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        let entries = DEFAULT_LEXICON
            .iter()
            .map(|(name, triggers)| CategoryEntry::new(*name, triggers.iter().copied()))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lexicon_keeps_declaration_order() {
        let lexicon = CategoryLexicon::default();
        assert_eq!(
            lexicon.categories(),
            vec![
                "Technology",
                "News",
                "Education",
                "Entertainment",
                "Business",
                "Social",
                "Shopping",
                "Health",
                "Science",
                "Other"
            ]
        );
    }

    #[test]
    fn default_lexicon_passes_validation() {
        let rebuilt = CategoryLexicon::new(CategoryLexicon::default().entries().to_vec()).unwrap();
        assert_eq!(rebuilt, CategoryLexicon::default());
    }

    #[test]
    fn triggers_are_lowercased_and_deduplicated() {
        let lexicon =
            CategoryLexicon::new(vec![CategoryEntry::new("Pets", ["Dog", " cat ", "dog"])])
                .unwrap();
        assert_eq!(lexicon.entries()[0].triggers, vec!["dog", "cat"]);
    }

    #[test]
    fn rejects_empty_lexicon() {
        assert_eq!(CategoryLexicon::new(vec![]), Err(LexiconError::Empty));
    }

    #[test]
    fn rejects_reserved_other() {
        let err = CategoryLexicon::new(vec![CategoryEntry::new("Other", ["x"])]).unwrap_err();
        assert_eq!(err, LexiconError::ReservedName("Other".into()));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = CategoryLexicon::new(vec![
            CategoryEntry::new("A", ["x"]),
            CategoryEntry::new("A", ["y"]),
        ])
        .unwrap_err();
        assert_eq!(err, LexiconError::DuplicateCategory("A".into()));
    }

    #[test]
    fn rejects_blank_names_and_triggers() {
        assert_eq!(
            CategoryLexicon::new(vec![CategoryEntry::new("  ", ["x"])]),
            Err(LexiconError::BlankName)
        );
        assert_eq!(
            CategoryLexicon::new(vec![CategoryEntry::new("A", Vec::<String>::new())]),
            Err(LexiconError::NoTriggers("A".into()))
        );
        assert_eq!(
            CategoryLexicon::new(vec![CategoryEntry::new("A", [" "])]),
            Err(LexiconError::BlankTrigger("A".into()))
        );
    }

    #[test]
    fn entry_deserializes_from_json() {
        let entry: CategoryEntry =
            serde_json::from_str(r#"{"name": "Sports", "triggers": ["goal", "match"]}"#).unwrap();
        assert_eq!(entry, CategoryEntry::new("Sports", ["goal", "match"]));
    }
}
