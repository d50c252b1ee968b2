//! NLP pipeline behind the inference endpoint.
//!
//! The server only sees the `NlpPipeline` trait; `PatternPipeline` is the
//! production implementation loaded once from a model directory.

pub mod patterns;
pub mod tokenizer;
pub mod types;

pub use patterns::PatternPipeline;
pub use types::{Doc, Entity, MockPipeline, NlpPipeline, SharedPipeline, Span, Token};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Pipeline model initialization: {0}")]
    ModelInit(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}
