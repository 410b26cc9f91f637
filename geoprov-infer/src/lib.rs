//! geoprov-infer library interface
//!
//! Ensemble inference of a URL's country of origin. Exposes public APIs for
//! the `geoprov` binary and integration testing.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fusion;
pub mod producers;
pub mod utils;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};
pub use crate::workflow::{EnsembleOrchestrator, InferenceOutcome, OrchestratorBuilder};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator shared by all requests (each inference owns its session)
    pub orchestrator: Arc<EnsembleOrchestrator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: Arc<EnsembleOrchestrator>) -> Self {
        Self {
            orchestrator,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::infer_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
