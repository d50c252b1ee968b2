//! Shared types for the API layer.

use crate::pipeline::SharedPipeline;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub pipeline: SharedPipeline,
}

impl ApiContext {
    pub fn new(pipeline: SharedPipeline) -> Self {
        Self { pipeline }
    }
}
