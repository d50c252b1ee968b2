//! Pattern-based NER and text categorisation loaded from a model directory.
//!
//! The model directory must contain `pipeline.json`:
//!
//! ```json
//! {
//!   "name": "ner_and_textcat",
//!   "entities":   [{ "label": "ORG", "patterns": ["Acme Corp", "Globex"] }],
//!   "categories": [{ "label": "FINANCE", "keywords": ["stock", "shares"] }]
//! }
//! ```
//!
//! Entity patterns and category keywords are matched case-insensitively on
//! whole tokens, longest phrase first, without overlaps. Entity labels share
//! one matcher so entity spans never overlap; each category has its own
//! matcher so categories are scored independently of each other.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::tokenizer::{self, Lexeme};
use super::types::{Doc, Entity, NlpPipeline};
use super::PipelineError;

/// File name of the pipeline definition inside the model directory.
pub const PIPELINE_FILE: &str = "pipeline.json";

#[derive(Debug, Deserialize)]
struct PipelineDefinition {
    name: String,
    #[serde(default)]
    entities: Vec<EntityRule>,
    #[serde(default)]
    categories: Vec<CategoryRule>,
}

#[derive(Debug, Deserialize)]
struct EntityRule {
    label: String,
    patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRule {
    label: String,
    keywords: Vec<String>,
}

/// Lower-cased token sequences, each tagged with the index of the rule
/// it came from. Kept sorted longest first.
#[derive(Debug, Default)]
struct PhraseMatcher {
    phrases: Vec<(Vec<String>, usize)>,
}

impl PhraseMatcher {
    fn add(&mut self, phrase: &str, rule: usize) -> Result<(), PipelineError> {
        let tokens: Vec<String> = tokenizer::tokenize(phrase)
            .iter()
            .map(|lx| lx.text.to_lowercase())
            .collect();
        if tokens.is_empty() {
            return Err(PipelineError::ModelInit(format!(
                "Empty phrase in rule #{rule}"
            )));
        }
        self.phrases.push((tokens, rule));
        Ok(())
    }

    fn finish(mut self) -> Self {
        self.phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self
    }

    /// Non-overlapping matches as `(first_token, token_count, rule)`.
    fn find(&self, lowered: &[String]) -> Vec<(usize, usize, usize)> {
        let mut matches = Vec::new();
        let mut i = 0;
        while i < lowered.len() {
            let hit = self.phrases.iter().find(|(phrase, _)| {
                lowered
                    .get(i..i + phrase.len())
                    .is_some_and(|window| window == phrase.as_slice())
            });
            match hit {
                Some((phrase, rule)) => {
                    matches.push((i, phrase.len(), *rule));
                    i += phrase.len();
                }
                None => i += 1,
            }
        }
        matches
    }
}

/// NER + text-categorisation pipeline driven by phrase lists.
#[derive(Debug)]
pub struct PatternPipeline {
    name: String,
    entity_labels: Vec<String>,
    entity_matcher: PhraseMatcher,
    category_labels: Vec<String>,
    /// One matcher per category, indexed like `category_labels`.
    category_matchers: Vec<PhraseMatcher>,
}

impl PatternPipeline {
    /// Load the pipeline from `model_dir/pipeline.json`.
    pub fn load(model_dir: &Path) -> Result<Self, PipelineError> {
        if !model_dir.is_dir() {
            return Err(PipelineError::ModelNotFound(model_dir.to_path_buf()));
        }
        let definition_path = model_dir.join(PIPELINE_FILE);
        if !definition_path.is_file() {
            return Err(PipelineError::ModelNotFound(definition_path));
        }

        let raw = std::fs::read_to_string(&definition_path)?;
        let pipeline = Self::from_json(&raw)?;

        tracing::info!(
            name = %pipeline.name,
            entity_labels = pipeline.entity_labels.len(),
            categories = pipeline.category_labels.len(),
            "Pipeline loaded from {}",
            model_dir.display()
        );
        Ok(pipeline)
    }

    /// Build the pipeline from the JSON definition text.
    pub fn from_json(raw: &str) -> Result<Self, PipelineError> {
        let definition: PipelineDefinition = serde_json::from_str(raw)
            .map_err(|e| PipelineError::ModelInit(format!("Invalid {PIPELINE_FILE}: {e}")))?;

        let mut entity_matcher = PhraseMatcher::default();
        let mut entity_labels = Vec::with_capacity(definition.entities.len());
        for (idx, rule) in definition.entities.into_iter().enumerate() {
            for pattern in &rule.patterns {
                entity_matcher.add(pattern, idx)?;
            }
            entity_labels.push(rule.label);
        }

        let mut category_matchers = Vec::with_capacity(definition.categories.len());
        let mut category_labels = Vec::with_capacity(definition.categories.len());
        for (idx, rule) in definition.categories.into_iter().enumerate() {
            let mut matcher = PhraseMatcher::default();
            for keyword in &rule.keywords {
                matcher.add(keyword, idx)?;
            }
            category_matchers.push(matcher.finish());
            category_labels.push(rule.label);
        }

        Ok(Self {
            name: definition.name,
            entity_labels,
            entity_matcher: entity_matcher.finish(),
            category_labels,
            category_matchers,
        })
    }

    fn entities(&self, lexemes: &[Lexeme<'_>], lowered: &[String]) -> Vec<Entity> {
        self.entity_matcher
            .find(lowered)
            .into_iter()
            .map(|(first, count, rule)| Entity {
                start: lexemes[first].start,
                end: lexemes[first + count - 1].end,
                label: self.entity_labels[rule].clone(),
            })
            .collect()
    }

    /// Each category scores the share of non-punctuation tokens covered by
    /// its own keywords, in `[0, 1]`. Every category is present.
    fn categories(&self, lexemes: &[Lexeme<'_>], lowered: &[String]) -> BTreeMap<String, f32> {
        let words = lexemes.iter().filter(|lx| !lx.is_punct()).count();
        self.category_labels
            .iter()
            .zip(&self.category_matchers)
            .map(|(label, matcher)| {
                let hits: usize = matcher
                    .find(lowered)
                    .into_iter()
                    .map(|(first, count, _)| {
                        lexemes[first..first + count]
                            .iter()
                            .filter(|lx| !lx.is_punct())
                            .count()
                    })
                    .sum();
                let score = if words == 0 {
                    0.0
                } else {
                    (hits as f32 / words as f32).min(1.0)
                };
                (label.clone(), score)
            })
            .collect()
    }
}

impl NlpPipeline for PatternPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, text: &str) -> Result<Doc, PipelineError> {
        let lexemes = tokenizer::tokenize(text);
        let lowered: Vec<String> = lexemes.iter().map(|lx| lx.text.to_lowercase()).collect();

        let mut doc = Doc::from_lexemes(text, &lexemes);
        doc.ents = self.entities(&lexemes, &lowered);
        doc.cats = self.categories(&lexemes, &lowered);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{
        "name": "ner_and_textcat",
        "entities": [
            { "label": "ORG", "patterns": ["Acme", "Acme Corp", "Globex"] },
            { "label": "GPE", "patterns": ["New York", "Paris"] }
        ],
        "categories": [
            { "label": "FINANCE", "keywords": ["shares", "stock market"] },
            { "label": "TRAVEL", "keywords": ["flight", "hotel"] }
        ]
    }"#;

    fn pipeline() -> PatternPipeline {
        PatternPipeline::from_json(DEFINITION).unwrap()
    }

    #[test]
    fn longest_pattern_wins() {
        let doc = pipeline().analyze("Acme Corp opened in New York.").unwrap();

        assert_eq!(doc.ents.len(), 2);
        assert_eq!(doc.ents[0].label, "ORG");
        assert_eq!(doc.span_text(doc.ents[0].start, doc.ents[0].end), "Acme Corp");
        assert_eq!(doc.ents[1].label, "GPE");
        assert_eq!(doc.span_text(doc.ents[1].start, doc.ents[1].end), "New York");
    }

    #[test]
    fn matching_is_case_insensitive_on_whole_tokens() {
        let doc = pipeline().analyze("globex and Parisian pastries").unwrap();

        assert_eq!(doc.ents.len(), 1);
        assert_eq!(doc.span_text(doc.ents[0].start, doc.ents[0].end), "globex");
    }

    #[test]
    fn categories_score_keyword_coverage() {
        // 4 word tokens, "Shares" + "stock market" cover 3
        let doc = pipeline().analyze("Shares stock market rally!").unwrap();

        assert!((doc.cats["FINANCE"] - 0.75).abs() < 1e-6);
        assert_eq!(doc.cats["TRAVEL"], 0.0);
    }

    #[test]
    fn keyword_shared_by_two_categories_scores_both() {
        let raw = r#"{
            "name": "x",
            "categories": [
                { "label": "BUSINESS", "keywords": ["market"] },
                { "label": "FINANCE", "keywords": ["market"] }
            ]
        }"#;
        let doc = PatternPipeline::from_json(raw).unwrap().analyze("market").unwrap();

        assert_eq!(doc.cats["BUSINESS"], 1.0);
        assert_eq!(doc.cats["FINANCE"], 1.0);
    }

    #[test]
    fn longer_phrase_in_one_category_does_not_hide_another() {
        let raw = r#"{
            "name": "x",
            "categories": [
                { "label": "BUSINESS", "keywords": ["market"] },
                { "label": "FINANCE", "keywords": ["stock market"] }
            ]
        }"#;
        let doc = PatternPipeline::from_json(raw).unwrap().analyze("stock market").unwrap();

        assert!((doc.cats["BUSINESS"] - 0.5).abs() < 1e-6);
        assert_eq!(doc.cats["FINANCE"], 1.0);
    }

    #[test]
    fn punctuation_is_not_counted_as_a_word() {
        let doc = pipeline().analyze("hotel, flight!").unwrap();

        assert_eq!(doc.cats["TRAVEL"], 1.0);
    }

    #[test]
    fn every_category_present_for_empty_text() {
        let doc = pipeline().analyze("").unwrap();

        assert!(doc.tokens.is_empty());
        assert!(doc.ents.is_empty());
        assert_eq!(doc.cats.len(), 2);
        assert!(doc.cats.values().all(|s| *s == 0.0));
    }

    #[test]
    fn hello_produces_tokens_and_sentence() {
        let doc = pipeline().analyze("hello").unwrap();

        assert_eq!(doc.text, "hello");
        assert_eq!(doc.tokens.len(), 1);
        assert_eq!(doc.sents.len(), 1);
    }

    #[test]
    fn invalid_json_is_model_init_error() {
        let err = PatternPipeline::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PipelineError::ModelInit(_)));
    }

    #[test]
    fn blank_pattern_is_rejected() {
        let raw = r#"{"name":"x","entities":[{"label":"ORG","patterns":["  "]}]}"#;
        let err = PatternPipeline::from_json(raw).unwrap_err();
        assert!(matches!(err, PipelineError::ModelInit(_)));
    }

    #[test]
    fn load_reads_definition_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PIPELINE_FILE), DEFINITION).unwrap();

        let pipeline = PatternPipeline::load(dir.path()).unwrap();
        assert_eq!(pipeline.name(), "ner_and_textcat");
    }

    #[test]
    fn load_missing_directory_is_model_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ner_and_textcat");

        let err = PatternPipeline::load(&missing).unwrap_err();
        assert!(matches!(err, PipelineError::ModelNotFound(p) if p == missing));
    }

    #[test]
    fn load_missing_definition_is_model_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = PatternPipeline::load(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::ModelNotFound(p) if p.ends_with(PIPELINE_FILE)));
    }

    #[test]
    fn bundled_model_directory_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::config::DEFAULT_MODEL_DIR);
        let pipeline = PatternPipeline::load(&dir).unwrap();

        let doc = pipeline.analyze("Apple is buying a startup in San Francisco.").unwrap();
        let labels: Vec<&str> = doc.ents.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["ORG", "GPE"]);
        assert!(doc.cats["BUSINESS"] > 0.0);
    }
}
