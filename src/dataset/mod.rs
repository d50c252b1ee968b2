//! Dataset file helpers for the model-preparation workflow.
//!
//! Each function is independent and stateless: CSV and JSONL reading,
//! JSONL writing, ratio-based train/validation/test splitting and
//! idempotent directory creation.

pub mod fs;
pub mod jsonl;
pub mod split;
pub mod tabular;

pub use fs::ensure_dir;
pub use jsonl::{read_jsonl, write_jsonl};
pub use split::{split_train_val_test, DatasetSplit, DEFAULT_SPLIT_RATIO};
pub use tabular::{read_csv, CsvRecord};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Split ratios must sum to 1.0, got {sum}")]
    RatioSum { sum: f64 },

    #[error("Split ratio must be a finite, non-negative number, got {0}")]
    InvalidRatio(f64),
}
