//! HTTP API handlers for geoprov
//!
//! Inference over HTTP REST (collected JSON) and SSE (live events).

pub mod health;
pub mod infer;

pub use health::health_routes;
pub use infer::infer_routes;
