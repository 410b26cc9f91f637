//! # geoprov Common Library
//!
//! Shared code for the geoprov crates including:
//! - Signal names and country distributions
//! - Inference event types (InferenceEvent)
//! - Configuration loading
//! - SSE helpers

pub mod config;
pub mod error;
pub mod events;
pub mod sse;

pub use error::{Error, Result};
pub use events::{CountryDistribution, InferenceEvent, SignalName};
