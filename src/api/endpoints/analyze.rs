//! `GET /<any path>?q=<text>` — run the pipeline on `q`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::Doc;

/// Name of the query parameter carrying the input text.
pub const TEXT_PARAM: &str = "q";

/// Either the analysed document or `{}` when no text was given.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Doc(Doc),
    Empty(EmptyBody),
}

#[derive(Debug, Serialize)]
pub struct EmptyBody {}

/// First non-blank value of `name`. Blank values count as absent.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.as_str())
}

pub async fn analyze(
    State(ctx): State<ApiContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    tracing::info!(?params, "Analyze request");

    let Some(text) = first_param(&params, TEXT_PARAM) else {
        return Ok(Json(AnalyzeResponse::Empty(EmptyBody {})));
    };

    let doc = ctx.pipeline.analyze(text)?;
    tracing::debug!(
        pipeline = ctx.pipeline.name(),
        tokens = doc.tokens.len(),
        ents = doc.ents.len(),
        "Text analyzed"
    );
    Ok(Json(AnalyzeResponse::Doc(doc)))
}
