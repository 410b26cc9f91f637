//! Inference endpoints
//!
//! - `GET /infer?url=...` streams every inference event over SSE and closes
//!   after the final result
//! - `POST /infer` runs the inference to completion and returns all events
//!   plus the posterior as JSON

use axum::extract::{Query, State};
use axum::response::sse::{Event, Sse};
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::Stream;
use geoprov_common::{CountryDistribution, InferenceEvent};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::fusion::top_countries;
use crate::utils::validate_target;
use crate::AppState;

/// Countries listed in `top` when the request does not say
pub const DEFAULT_TOP: usize = 5;

/// Query parameters for `GET /infer`
#[derive(Debug, Deserialize)]
pub struct InferQuery {
    pub url: Option<String>,
}

/// Body of `POST /infer`
#[derive(Debug, Deserialize)]
pub struct InferRequest {
    #[serde(default)]
    pub url: Option<String>,
    /// Number of countries to rank in the response
    #[serde(default)]
    pub top: Option<usize>,
}

/// One ranked country
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RankedCountry {
    pub country: String,
    pub probability: f64,
}

/// Response of `POST /infer`
#[derive(Debug, Serialize, Deserialize)]
pub struct InferResponse {
    pub url: String,
    pub events: Vec<InferenceEvent>,
    pub distribution: CountryDistribution,
    pub top: Vec<RankedCountry>,
}

fn required_url(url: Option<String>) -> ApiResult<String> {
    let url = url.ok_or_else(|| ApiError::BadRequest("missing required parameter: url".to_string()))?;
    Ok(validate_target(&url)?)
}

/// GET /infer?url=...
pub async fn infer_events(
    State(state): State<AppState>,
    Query(query): Query<InferQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let url = required_url(query.url)?;
    info!(url = %url, "SSE inference requested");

    let events = state.orchestrator.infer_stream(url);
    Ok(geoprov_common::sse::inference_sse_stream(events))
}

/// POST /infer
pub async fn infer_json(
    State(state): State<AppState>,
    Json(request): Json<InferRequest>,
) -> ApiResult<Json<InferResponse>> {
    let url = required_url(request.url)?;
    info!(url = %url, "Inference requested");

    let outcome = state.orchestrator.infer_collect(&url).await;
    let top = top_countries(&outcome.distribution, request.top.unwrap_or(DEFAULT_TOP))
        .into_iter()
        .map(|(country, probability)| RankedCountry {
            country,
            probability,
        })
        .collect();

    Ok(Json(InferResponse {
        url: outcome.url,
        events: outcome.events,
        distribution: outcome.distribution,
        top,
    }))
}

/// Build inference routes
pub fn infer_routes() -> Router<AppState> {
    Router::new().route("/infer", get(infer_events).post(infer_json))
}
