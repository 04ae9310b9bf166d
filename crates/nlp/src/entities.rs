use std::collections::BTreeMap;

use ingest::{is_blank, truncate_chars, FallbackReason, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::InferenceClient;
use crate::config::EntityConfig;
use crate::error::NlpError;

/// Longest input sent to the recognizer.
pub const MAX_ENTITY_INPUT_CHARS: usize = 10_000;

/// Entity label → unique surface strings in recognition order. Keys are sorted.
pub type EntityMap = BTreeMap<String, Vec<String>>;

/// One recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: String,
    pub text: String,
}

impl EntitySpan {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Groups spans by label.
///
/// Surface strings keep first-seen order; repeats of an exact string under
/// the same label are dropped. An empty input gives an empty map.
pub fn group_entities<I>(spans: I) -> EntityMap
where
    I: IntoIterator<Item = EntitySpan>,
{
    let mut map = EntityMap::new();
    for span in spans {
        let texts = map.entry(span.label).or_default();
        if !texts.contains(&span.text) {
            texts.push(span.text);
        }
    }
    map
}

/// Named-entity recognizer backed by a token-classification model.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    cfg: EntityConfig,
    client: Option<InferenceClient>,
}

impl EntityExtractor {
    pub fn new(cfg: EntityConfig) -> Result<Self, NlpError> {
        let client = InferenceClient::from_endpoint(&cfg.endpoint)?;
        Ok(Self { cfg, client })
    }

    pub fn offline() -> Self {
        Self::default()
    }

    pub fn is_model_backed(&self) -> bool {
        self.client.is_some()
    }

    /// Extracts entities from the first 10,000 characters of `text`.
    ///
    /// Blank text never reaches the model. Any model problem yields `{}`.
    pub async fn extract(&self, text: &str) -> Outcome<EntityMap> {
        if is_blank(text) {
            return Outcome::fallback(EntityMap::new(), FallbackReason::EmptyInput);
        }
        let Some(client) = &self.client else {
            return Outcome::fallback(EntityMap::new(), FallbackReason::ModelUnavailable);
        };

        let input = truncate_chars(text, MAX_ENTITY_INPUT_CHARS);
        let payload = json!({
            "inputs": input,
            "parameters": { "aggregation_strategy": self.cfg.aggregation_strategy },
        });

        let spans = match client.post_json(&payload).await {
            Ok(value) => parse_spans(value),
            Err(err) => Err(err),
        };
        match spans {
            Ok(spans) => {
                let map = group_entities(spans);
                debug!(labels = map.len(), "entities_extracted");
                Outcome::Computed(map)
            }
            Err(err @ NlpError::Response(_)) => {
                warn!(url = client.url(), error = %err, "unusable entity output");
                Outcome::fallback(EntityMap::new(), FallbackReason::invalid_output(err.to_string()))
            }
            Err(err) => {
                warn!(url = client.url(), error = %err, "entity extraction failed");
                Outcome::fallback(EntityMap::new(), FallbackReason::model_failed(err.to_string()))
            }
        }
    }
}

/// Reads a token-classification response into spans.
///
/// Accepts aggregated output (`entity_group`) and raw tagger output
/// (`entity`, with `B-`/`I-` prefixes stripped). Blank words are skipped.
fn parse_spans(value: Value) -> Result<Vec<EntitySpan>, NlpError> {
    let Value::Array(items) = value else {
        return Err(NlpError::Response("expected an array of entities".into()));
    };

    let mut spans = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(obj) = item else {
            return Err(NlpError::Response("entity is not an object".into()));
        };
        let label = obj
            .get("entity_group")
            .or_else(|| obj.get("entity"))
            .and_then(Value::as_str)
            .map(strip_iob_prefix)
            .ok_or_else(|| NlpError::Response("entity without a label".into()))?;
        let word = obj
            .get("word")
            .and_then(Value::as_str)
            .ok_or_else(|| NlpError::Response("entity without a word".into()))?
            .trim();
        if word.is_empty() {
            continue;
        }
        spans.push(EntitySpan::new(label, word));
    }
    Ok(spans)
}

fn strip_iob_prefix(label: &str) -> &str {
    label
        .strip_prefix("B-")
        .or_else(|| label.strip_prefix("I-"))
        .unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{closed_url, serve_capture, serve_once};
    use crate::config::EndpointConfig;

    fn with_url(url: String) -> EntityExtractor {
        EntityExtractor::new(EntityConfig {
            endpoint: EndpointConfig::new(url),
            ..EntityConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn groups_by_label_in_order() {
        let map = group_entities(vec![
            EntitySpan::new("ORG", "Apple"),
            EntitySpan::new("PER", "Tim Cook"),
            EntitySpan::new("ORG", "Google"),
        ]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["ORG", "PER"]);
        assert_eq!(map["ORG"], vec!["Apple", "Google"]);
        assert_eq!(map["PER"], vec!["Tim Cook"]);
    }

    #[test]
    fn suppresses_exact_duplicates() {
        let map = group_entities(vec![
            EntitySpan::new("LOC", "Paris"),
            EntitySpan::new("LOC", "Berlin"),
            EntitySpan::new("LOC", "Paris"),
            EntitySpan::new("ORG", "Paris"),
        ]);
        assert_eq!(map["LOC"], vec!["Paris", "Berlin"]);
        assert_eq!(map["ORG"], vec!["Paris"]);
    }

    #[test]
    fn no_spans_is_empty_map() {
        assert!(group_entities(Vec::new()).is_empty());
    }

    #[test]
    fn parses_aggregated_and_raw_output() {
        let value = serde_json::json!([
            {"entity_group": "PER", "word": " Ada Lovelace ", "score": 0.99},
            {"entity": "B-LOC", "word": "London"},
            {"entity_group": "MISC", "word": "  "}
        ]);
        let spans = parse_spans(value).unwrap();
        assert_eq!(
            spans,
            vec![
                EntitySpan::new("PER", "Ada Lovelace"),
                EntitySpan::new("LOC", "London"),
            ]
        );
    }

    #[test]
    fn rejects_malformed_output() {
        assert!(parse_spans(serde_json::json!({"error": "x"})).is_err());
        assert!(parse_spans(serde_json::json!([{"word": "x"}])).is_err());
    }

    #[tokio::test]
    async fn blank_text_skips_the_model() {
        // An unreachable endpoint proves no call was attempted.
        let extractor = with_url(closed_url().await);
        let out = extractor.extract("   ").await;
        assert!(out.value().is_empty());
        assert_eq!(out.reason(), Some(&FallbackReason::EmptyInput));
    }

    #[tokio::test]
    async fn offline_yields_empty_map() {
        let out = EntityExtractor::offline()
            .extract("Barack Obama visited Paris.")
            .await;
        assert!(out.value().is_empty());
        assert_eq!(out.reason(), Some(&FallbackReason::ModelUnavailable));
    }

    #[tokio::test]
    async fn model_output_is_grouped() {
        let url = serve_once(
            200,
            r#"[{"entity_group":"PER","word":"Barack Obama"},{"entity_group":"LOC","word":"Paris"}]"#,
        )
        .await;
        let out = with_url(url).extract("Barack Obama visited Paris.").await;
        assert!(!out.is_fallback());
        assert_eq!(out.value()["PER"], vec!["Barack Obama"]);
        assert_eq!(out.value()["LOC"], vec!["Paris"]);
    }

    #[tokio::test]
    async fn model_input_is_capped_at_10000_chars() {
        let (url, sent) = serve_capture(200, "[]").await;
        let text = "Zoë in Köln. ".repeat(1_000);
        let out = with_url(url).extract(&text).await;
        assert_eq!(out, Outcome::Computed(EntityMap::new()));

        let payload = sent.await.unwrap();
        let inputs = payload["inputs"].as_str().unwrap();
        assert_eq!(inputs.chars().count(), MAX_ENTITY_INPUT_CHARS);
        assert!(text.starts_with(inputs));
        assert_eq!(payload["parameters"]["aggregation_strategy"], "simple");
    }

    #[tokio::test]
    async fn failed_call_yields_empty_map() {
        let url = serve_once(500, r#"{"error":"boom"}"#).await;
        let out = with_url(url).extract("Barack Obama visited Paris.").await;
        assert!(out.value().is_empty());
        assert!(matches!(out.reason(), Some(FallbackReason::ModelFailed { .. })));
    }
}
