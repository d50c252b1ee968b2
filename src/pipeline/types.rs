use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::tokenizer::{self, Lexeme};
use super::PipelineError;

/// A token with character offsets into `Doc::text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: usize,
    pub start: usize,
    pub end: usize,
}

/// Character span, used for sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Labelled entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Analysed document: tokens, sentences, entities and category scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sents: Vec<Span>,
    pub ents: Vec<Entity>,
    pub cats: BTreeMap<String, f32>,
}

impl Doc {
    /// Build a document from already tokenized text, with no entities or
    /// categories yet.
    pub fn from_lexemes(text: &str, lexemes: &[Lexeme<'_>]) -> Self {
        Self {
            text: text.to_string(),
            tokens: lexemes
                .iter()
                .map(|lx| Token {
                    id: lx.id,
                    start: lx.start,
                    end: lx.end,
                })
                .collect(),
            sents: tokenizer::sentences(lexemes),
            ents: Vec::new(),
            cats: BTreeMap::new(),
        }
    }

    /// Tokenize and sentence-split `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lexemes(text, &tokenizer::tokenize(text))
    }

    /// Text covered by a character span.
    pub fn span_text(&self, start: usize, end: usize) -> String {
        self.text
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }
}

/// A loaded NLP pipeline: text in, analysed `Doc` out.
///
/// Implementations are immutable after construction so one instance can
/// be shared by every request.
pub trait NlpPipeline: Send + Sync {
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> Result<Doc, PipelineError>;
}

/// Pipeline handle injected into the HTTP layer.
pub type SharedPipeline = Arc<dyn NlpPipeline>;

/// Mock pipeline for unit testing without a model directory.
pub struct MockPipeline {
    pub entity_label: Option<String>,
    pub failure: Option<String>,
}

impl MockPipeline {
    /// Tokenizes and scores every text as category `MOCK` = 1.0.
    pub fn new() -> Self {
        Self {
            entity_label: None,
            failure: None,
        }
    }

    /// Additionally tags the whole text as one entity with `label`.
    pub fn labelling_everything(label: &str) -> Self {
        Self {
            entity_label: Some(label.to_string()),
            failure: None,
        }
    }

    /// Fails every call with `PipelineError::Inference(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            entity_label: None,
            failure: Some(message.to_string()),
        }
    }
}

impl Default for MockPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpPipeline for MockPipeline {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(&self, text: &str) -> Result<Doc, PipelineError> {
        if let Some(message) = &self.failure {
            return Err(PipelineError::Inference(message.clone()));
        }

        let mut doc = Doc::from_text(text);
        if let (Some(label), Some(first), Some(last)) =
            (&self.entity_label, doc.tokens.first(), doc.tokens.last())
        {
            doc.ents.push(Entity {
                start: first.start,
                end: last.end,
                label: label.clone(),
            });
        }
        doc.cats.insert("MOCK".to_string(), 1.0);
        Ok(doc)
    }
}
