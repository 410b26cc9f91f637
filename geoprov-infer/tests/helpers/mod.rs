//! Test Helper Utilities
//!
//! Scripted producers and orchestrator constructors shared by the
//! integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use geoprov_common::events::{EventKind, EventSignal};
use geoprov_common::{CountryDistribution, InferenceEvent, SignalName};
use geoprov_infer::fusion::SignalEvidence;
use geoprov_infer::producers::{ProducerError, ProgressReporter, SignalProducer};
use geoprov_infer::EnsembleOrchestrator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Producer with a scripted outcome
pub struct ScriptedProducer {
    pub name: SignalName,
    pub outcome: Result<CountryDistribution, String>,
    pub delay: Duration,
    /// Set once the producer ran to completion
    pub finished: Arc<AtomicBool>,
}

impl ScriptedProducer {
    pub fn ok(name: SignalName, pairs: &[(&str, f64)]) -> Self {
        Self {
            name,
            outcome: Ok(pairs.iter().map(|&(c, w)| (c, w)).collect()),
            delay: Duration::ZERO,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing(name: SignalName, detail: &str) -> Self {
        Self {
            name,
            outcome: Err(detail.to_string()),
            delay: Duration::ZERO,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn after(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn arc(self) -> Arc<dyn SignalProducer> {
        Arc::new(self)
    }
}

#[async_trait]
impl SignalProducer for ScriptedProducer {
    fn name(&self) -> SignalName {
        self.name
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        progress.message(format!("inspecting {}", url));
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        match &self.outcome {
            Ok(dist) => Ok(SignalEvidence::new(dist.clone())),
            Err(detail) => Err(ProducerError::NoData(detail.clone())),
        }
    }
}

/// Producer that panics instead of reporting
pub struct PanickingProducer(pub SignalName);

#[async_trait]
impl SignalProducer for PanickingProducer {
    fn name(&self) -> SignalName {
        self.0
    }

    async fn produce(
        &self,
        _url: &str,
        _progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        panic!("boom");
    }
}

pub fn orchestrator(producers: Vec<Arc<dyn SignalProducer>>) -> EnsembleOrchestrator {
    producers
        .into_iter()
        .fold(EnsembleOrchestrator::builder(), |b, p| b.producer(p))
        .build()
        .unwrap()
}

pub fn final_result_count(events: &[InferenceEvent]) -> usize {
    events.iter().filter(|e| e.is_final_result()).count()
}

pub fn events_of(events: &[InferenceEvent], signal: SignalName, kind: EventKind) -> Vec<&InferenceEvent> {
    events
        .iter()
        .filter(|e| e.signal == EventSignal::Signal(signal) && e.kind == kind)
        .collect()
}

pub fn final_messages(events: &[InferenceEvent]) -> Vec<&str> {
    events
        .iter()
        .filter(|e| e.signal == EventSignal::Final && e.kind == EventKind::Message)
        .filter_map(|e| e.text())
        .collect()
}
