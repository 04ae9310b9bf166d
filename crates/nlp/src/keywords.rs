use std::collections::HashMap;

use ingest::{trimmed_char_count, FallbackReason, Outcome};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::KeywordConfig;
use crate::error::NlpError;
use crate::stopwords::StopwordFilter;

/// A ranked keyword candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTerm {
    pub term: String,
    pub weight: f64,
}

/// Single-document TF-IDF keyword extractor over unigrams and bigrams.
///
/// Scoring a lone document makes every inverse document frequency equal,
/// so selection reduces to term frequency. Equal weights are broken
/// alphabetically, and the selected terms are returned in alphabetical
/// order.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    cfg: KeywordConfig,
    stopwords: StopwordFilter,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            cfg: KeywordConfig::default(),
            stopwords: StopwordFilter::default(),
        }
    }
}

impl KeywordExtractor {
    pub fn new(cfg: KeywordConfig) -> Result<Self, NlpError> {
        if cfg.max_ngram == 0 {
            return Err(NlpError::InvalidConfig(
                "keywords.max_ngram must be at least 1".into(),
            ));
        }
        let mut stopwords = StopwordFilter::for_language(&cfg.stop_words_language)?;
        stopwords.extend(&cfg.extra_stop_words);
        Ok(Self { cfg, stopwords })
    }

    /// Returns the `top_n` highest-weighted keywords, sorted alphabetically.
    ///
    /// Texts under the minimum length give `[]` without scoring.
    pub fn extract(&self, text: &str, top_n: usize) -> Outcome<Vec<String>> {
        let chars = trimmed_char_count(text);
        if chars == 0 {
            return Outcome::fallback(Vec::new(), FallbackReason::EmptyInput);
        }
        if chars < self.cfg.min_chars {
            return Outcome::fallback(
                Vec::new(),
                FallbackReason::ShortInput {
                    chars,
                    threshold: self.cfg.min_chars,
                },
            );
        }

        let mut keywords: Vec<String> = self
            .rank_terms(text)
            .into_iter()
            .take(top_n)
            .map(|t| t.term)
            .collect();
        keywords.sort_unstable();
        trace!(count = keywords.len(), top_n, "keywords_extracted");
        Outcome::Computed(keywords)
    }

    /// Scores every candidate term in `text`: highest weight first, equal
    /// weights in alphabetical order.
    pub fn rank_terms(&self, text: &str) -> Vec<ScoredTerm> {
        let tokens = self.tokenize(text);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for n in 1..=self.cfg.max_ngram {
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }

        let idf = smoothed_idf(1, 1);
        let mut ranked: Vec<ScoredTerm> = counts
            .into_iter()
            .map(|(term, count)| ScoredTerm {
                term,
                weight: count as f64 * idf,
            })
            .collect();
        let norm = ranked.iter().map(|t| t.weight * t.weight).sum::<f64>().sqrt();
        if norm > 0.0 {
            for t in &mut ranked {
                t.weight /= norm;
            }
        }
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.term.cmp(&b.term)));
        ranked
    }

    /// Lower-cased words of two or more characters, stop words removed.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|w| w.chars().count() >= 2)
            .filter(|w| !self.stopwords.is_stopword(w))
            .collect()
    }
}

/// `ln((1 + n) / (1 + df)) + 1`; equals 1.0 whenever `df == n`.
fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1 + n_docs) as f64 / (1 + doc_freq) as f64).ln() + 1.0
}
