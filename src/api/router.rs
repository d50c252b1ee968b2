//! Inference API router.
//!
//! Every path answers GET with the analyze handler, so clients can use
//! `/`, `/analyze` or anything else. Other methods get `405`.

use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::pipeline::SharedPipeline;

/// Build the inference router around a loaded pipeline.
pub fn analysis_router(pipeline: SharedPipeline) -> Router {
    let ctx = ApiContext::new(pipeline);

    // NOTE: `/*path` does not match `/` in axum 0.7, so both are mounted.
    Router::new()
        .route("/", get(endpoints::analyze::analyze))
        .route("/*path", get(endpoints::analyze::analyze))
        .with_state(ctx)
}
