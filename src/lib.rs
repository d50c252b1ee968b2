pub mod api; // Inference HTTP API
pub mod config;
pub mod dataset; // CSV / JSONL I/O and train/val/test splitting
pub mod pipeline; // NLP pipeline seam + pattern NER/textcat

#[cfg(test)]
mod test_logs;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::ServeError;
use crate::pipeline::{PatternPipeline, SharedPipeline};

/// Process entry: load the pipeline once, then serve on the fixed port
/// until Ctrl-C. Requests are handled one at a time on a current-thread
/// runtime.
pub fn run() -> Result<(), ServeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let pipeline: SharedPipeline = Arc::new(PatternPipeline::load(&config::model_dir())?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServeError::Runtime)?;

    runtime.block_on(api::serve_until_ctrl_c(pipeline, config::bind_addr()))
}
