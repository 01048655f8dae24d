use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use nl_core::{BiasBuckets, SearchResults, SourceBias, TimelineOutcome};
use crate::error::{ApiQuery, ApiResult};
use crate::AppState;

/// Optional so a missing parameter surfaces as an `invalid_input` JSON error.
#[derive(Debug, Deserialize)]
pub struct TopicParams {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeParams {
    pub article_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlParams {
    pub url: Option<String>,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the News AI API" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn everything(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TopicParams>,
) -> ApiResult<Json<SearchResults>> {
    let topic = params.topic.unwrap_or_default();
    Ok(Json(state.pipeline.everything(&topic).await?))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SummarizeParams>,
) -> ApiResult<Json<Value>> {
    let url = params.article_url.unwrap_or_default();
    let summary = state.pipeline.summarize(&url).await?;
    Ok(Json(json!({ "summary": summary })))
}

pub async fn timeline(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TopicParams>,
) -> ApiResult<Json<TimelineOutcome>> {
    let topic = params.topic.unwrap_or_default();
    Ok(Json(state.pipeline.timeline(&topic).await?))
}

pub async fn bias(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<TopicParams>,
) -> ApiResult<Json<BiasBuckets>> {
    let topic = params.topic.unwrap_or_default();
    Ok(Json(state.pipeline.bias(&topic).await?))
}

pub async fn source_bias(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<UrlParams>,
) -> ApiResult<Json<SourceBias>> {
    let url = params.url.unwrap_or_default();
    Ok(Json(state.pipeline.source_bias(&url)?))
}
