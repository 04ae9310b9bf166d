//! Stop-word removal for keyword extraction, backed by the `stop-words` crate.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::error::NlpError;

/// Case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self {
            words: load(LANGUAGE::English),
        }
    }
}

impl StopwordFilter {
    /// Loads the list for `language` (ISO code or English name).
    pub fn for_language(language: &str) -> Result<Self, NlpError> {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            other => {
                return Err(NlpError::InvalidConfig(format!(
                    "unsupported stop-word language '{other}'"
                )))
            }
        };
        Ok(Self { words: load(lang) })
    }

    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn load(lang: LANGUAGE) -> HashSet<String> {
    get(lang).iter().map(|s| s.to_lowercase()).collect()
}
