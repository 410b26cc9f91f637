//! Ensemble workflow for URL country inference
//!
//! Runs every registered signal producer concurrently and joins their outcomes
//! into one posterior distribution.
//!
//! # Architecture
//!
//! One inference proceeds in stages:
//! 1. Create a fresh session recording which signals have reported
//! 2. Spawn each producer in its own task (optional deadline, panics caught)
//! 3. Drain producer reports from a single channel, surfacing events as they arrive
//! 4. Once every producer has reported, combine the partial results
//! 5. Emit the final result exactly once
//!
//! Uses the producer → session → combiner pipeline (see [`crate::fusion`]).

pub mod orchestrator;
pub mod session;

pub use orchestrator::{EnsembleOrchestrator, InferenceOutcome, OrchestratorBuilder};
pub use session::{InferenceSession, RecordOutcome};
