//! Ensemble orchestrator
//!
//! Fans one URL out to every registered producer and joins the outcomes.
//!
//! All producer reports flow over one unbounded channel into a single loop,
//! which is the only code touching the [`InferenceSession`]. The join check is
//! therefore evaluated at one sequencing point: simultaneous completions can
//! neither both miss nor both fire the final combination.

use crate::catalog::CountryCatalog;
use crate::fusion::{combine, ModelCoefficients, SignalEvidence};
use crate::producers::{
    ProducerDescriptor, ProducerError, ProducerReport, ProgressReporter, SignalProducer,
};
use crate::workflow::session::{InferenceSession, RecordOutcome};
use futures::stream::Stream;
use futures::FutureExt;
use geoprov_common::{CountryDistribution, Error, InferenceEvent, Result, SignalName};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Buffer between a running inference and its event consumer
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything one inference produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceOutcome {
    pub url: String,
    /// Every event in emission order, ending with the final result
    pub events: Vec<InferenceEvent>,
    pub distribution: CountryDistribution,
}

/// Builder for [`EnsembleOrchestrator`]
#[derive(Debug, Default)]
pub struct OrchestratorBuilder {
    producers: Vec<ProducerDescriptor>,
    coefficients: Option<ModelCoefficients>,
    catalog: Option<Arc<CountryCatalog>>,
    producer_timeout: Option<Duration>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer under its own signal name
    pub fn producer(self, producer: Arc<dyn SignalProducer>) -> Self {
        self.descriptor(ProducerDescriptor::new(producer))
    }

    pub fn descriptor(mut self, descriptor: ProducerDescriptor) -> Self {
        self.producers.push(descriptor);
        self
    }

    pub fn coefficients(mut self, coefficients: ModelCoefficients) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    pub fn catalog(mut self, catalog: Arc<CountryCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Deadline per producer (none by default)
    pub fn producer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.producer_timeout = timeout;
        self
    }

    /// # Errors
    /// [`Error::Config`] when two producers share a signal name or the
    /// timeout is zero.
    pub fn build(self) -> Result<EnsembleOrchestrator> {
        let mut seen = HashSet::new();
        for descriptor in &self.producers {
            if !seen.insert(descriptor.name) {
                return Err(Error::Config(format!(
                    "Producer '{}' registered twice",
                    descriptor.name
                )));
            }
        }
        if self.producer_timeout == Some(Duration::ZERO) {
            return Err(Error::Config("Producer timeout must be greater than zero".to_string()));
        }

        Ok(EnsembleOrchestrator {
            producers: self.producers,
            coefficients: Arc::new(self.coefficients.unwrap_or_default()),
            catalog: self.catalog.unwrap_or_else(CountryCatalog::shared),
            producer_timeout: self.producer_timeout,
        })
    }
}

/// Ensemble orchestrator
///
/// Stateless between calls: every [`infer`](Self::infer) owns its session,
/// so one orchestrator serves any number of concurrent inferences.
pub struct EnsembleOrchestrator {
    producers: Vec<ProducerDescriptor>,
    coefficients: Arc<ModelCoefficients>,
    catalog: Arc<CountryCatalog>,
    producer_timeout: Option<Duration>,
}

impl EnsembleOrchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Registered signal names in registration order
    pub fn producer_names(&self) -> Vec<SignalName> {
        self.producers.iter().map(|d| d.name).collect()
    }

    pub fn coefficients(&self) -> &ModelCoefficients {
        &self.coefficients
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    pub fn producer_timeout(&self) -> Option<Duration> {
        self.producer_timeout
    }

    /// Run one inference
    ///
    /// # Arguments
    /// * `url` - URL to infer the country of origin for
    /// * `events` - Optional sink receiving every event; the last one is the
    ///   final result
    ///
    /// # Returns
    /// The combined posterior over the catalog. Producer failures never fail
    /// the call.
    pub async fn infer(
        &self,
        url: &str,
        events: Option<&mpsc::Sender<InferenceEvent>>,
    ) -> CountryDistribution {
        let mut session = InferenceSession::new(url, self.producer_names());
        info!(
            session = %session.id(),
            url = url,
            producers = self.producers.len(),
            "Starting inference"
        );

        let (report_tx, mut report_rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();
        for descriptor in &self.producers {
            let producer = Arc::clone(&descriptor.producer);
            let signal = descriptor.name;
            let url = url.to_string();
            let tx = report_tx.clone();
            let timeout = self.producer_timeout;
            tasks.spawn(async move {
                let progress = ProgressReporter::new(signal, tx.clone());
                let outcome = run_producer(producer.as_ref(), &url, &progress, timeout).await;
                let _ = tx.send(ProducerReport::Finished { signal, outcome });
            });
        }
        // Only producer tasks hold senders now; the channel closes once they all exit
        drop(report_tx);

        while !session.is_complete() {
            let Some(report) = report_rx.recv().await else {
                for signal in session.missing() {
                    let err = ProducerError::ContractViolation(
                        "producer finished without reporting".to_string(),
                    );
                    self.record_failure(&mut session, signal, err, events).await;
                }
                break;
            };

            match report {
                ProducerReport::Message { signal, text } => {
                    emit(events, InferenceEvent::signal_message(signal, text)).await;
                }
                ProducerReport::Finished { signal, outcome } => {
                    if session.has_reported(signal) {
                        warn!(signal = %signal, "Duplicate terminal report ignored");
                        continue;
                    }
                    match outcome {
                        Ok(evidence) => {
                            debug!(signal = %signal, countries = evidence.distribution.len(), "Signal result");
                            emit(
                                events,
                                InferenceEvent::signal_result(signal, evidence.distribution.clone()),
                            )
                            .await;
                            self.record(&mut session, signal, evidence, events).await;
                        }
                        Err(err) => self.record_failure(&mut session, signal, err, events).await,
                    }
                }
            }
        }

        if session.registered().is_empty() {
            emit(events, InferenceEvent::final_message("received all producer results.")).await;
        }

        for (signal, key) in self.coefficients.unweighted_signals(session.partials()) {
            warn!(signal = %signal, key = %key, "No coefficient for signal, excluded from combination");
            emit(
                events,
                InferenceEvent::final_message(format!(
                    "no coefficient for signal {} ({}), result not weighted.",
                    signal, key
                )),
            )
            .await;
        }

        let posterior = combine(session.partials(), &self.coefficients, &self.catalog);
        let ranked = posterior.ranked();
        info!(
            session = %session.id(),
            url = url,
            elapsed_ms = session.elapsed_ms(),
            top = ranked.first().map(|(c, _)| c.as_str()).unwrap_or("-"),
            "Inference complete"
        );
        emit(events, InferenceEvent::final_result(posterior.clone())).await;
        posterior
    }

    /// Run one inference in the background and stream its events
    ///
    /// The stream ends after the final result. Dropping it aborts the
    /// inference and its outstanding producers.
    pub fn infer_stream(
        self: &Arc<Self>,
        url: impl Into<String>,
    ) -> impl Stream<Item = InferenceEvent> + Send + 'static {
        let orchestrator = Arc::clone(self);
        let url = url.into();

        async_stream::stream! {
            let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
            let _task = AbortOnDrop(tokio::spawn(async move {
                orchestrator.infer(&url, Some(&tx)).await;
            }));

            while let Some(event) = rx.recv().await {
                let done = event.is_final_result();
                yield event;
                if done {
                    break;
                }
            }
        }
    }

    /// Run one inference and collect all of its events
    pub async fn infer_collect(&self, url: &str) -> InferenceOutcome {
        let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let inference = async move {
            let tx = tx;
            self.infer(url, Some(&tx)).await
        };
        let collector = async {
            let mut events = Vec::new();
            while let Some(event) = rx.recv().await {
                events.push(event);
            }
            events
        };

        let (distribution, events) = tokio::join!(inference, collector);
        InferenceOutcome {
            url: url.to_string(),
            events,
            distribution,
        }
    }

    async fn record(
        &self,
        session: &mut InferenceSession,
        signal: SignalName,
        evidence: SignalEvidence,
        events: Option<&mpsc::Sender<InferenceEvent>>,
    ) {
        if session.record(signal, evidence) != RecordOutcome::Recorded {
            warn!(signal = %signal, "Report for unknown or completed signal ignored");
            return;
        }

        let text = match session.outstanding() {
            0 => "received all producer results.".to_string(),
            n => format!("awaiting results from {} more producer(s).", n),
        };
        emit(events, InferenceEvent::final_message(text)).await;
    }

    async fn record_failure(
        &self,
        session: &mut InferenceSession,
        signal: SignalName,
        err: ProducerError,
        events: Option<&mpsc::Sender<InferenceEvent>>,
    ) {
        warn!(signal = %signal, error = %err, "Producer failed");
        emit(events, InferenceEvent::signal_error(signal, err.to_string())).await;
        self.record(session, signal, SignalEvidence::empty(), events).await;
    }
}

impl std::fmt::Debug for EnsembleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsembleOrchestrator")
            .field("producers", &self.producer_names())
            .field("producer_timeout", &self.producer_timeout)
            .finish()
    }
}

/// Run a producer to its terminal outcome, converting panics and timeouts to failures
async fn run_producer(
    producer: &dyn SignalProducer,
    url: &str,
    progress: &ProgressReporter,
    timeout: Option<Duration>,
) -> std::result::Result<SignalEvidence, ProducerError> {
    let guarded = AssertUnwindSafe(producer.produce(url, progress)).catch_unwind();

    let caught = match timeout {
        Some(limit) => match tokio::time::timeout(limit, guarded).await {
            Ok(caught) => caught,
            Err(_) => return Err(ProducerError::Timeout(limit)),
        },
        None => guarded.await,
    };

    caught.unwrap_or_else(|panic| {
        Err(ProducerError::Internal(format!(
            "producer panicked: {}",
            panic_message(panic.as_ref())
        )))
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(text) = panic.downcast_ref::<&'static str>() {
        text
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.as_str()
    } else {
        "unknown panic"
    }
}

/// Send an event to the sink (if any); a closed sink is ignored
async fn emit(events: Option<&mpsc::Sender<InferenceEvent>>, event: InferenceEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event).await;
    }
}

/// Aborts a spawned task when dropped
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producers::mock::MockProducer;
    use futures::StreamExt;
    use geoprov_common::events::{EventKind, EventSignal};

    fn dist(code: &str) -> CountryDistribution {
        CountryDistribution::single(code)
    }

    fn orchestrator(producers: Vec<MockProducer>) -> EnsembleOrchestrator {
        producers
            .into_iter()
            .fold(EnsembleOrchestrator::builder(), |b, p| b.producer(Arc::new(p)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = EnsembleOrchestrator::builder()
            .producer(Arc::new(MockProducer::new(SignalName::Tld, dist("de"))))
            .producer(Arc::new(MockProducer::new(SignalName::Tld, dist("fr"))))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = EnsembleOrchestrator::builder()
            .producer_timeout(Some(Duration::ZERO))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_producer_names_in_registration_order() {
        let orch = orchestrator(vec![
            MockProducer::new(SignalName::Lang, dist("de")),
            MockProducer::new(SignalName::Prior, dist("us")),
            MockProducer::new(SignalName::Tld, dist("de")),
        ]);
        assert_eq!(
            orch.producer_names(),
            vec![SignalName::Lang, SignalName::Prior, SignalName::Tld]
        );
    }

    #[tokio::test]
    async fn test_event_sequence() {
        let orch = orchestrator(vec![
            MockProducer::new(SignalName::Tld, dist("de")),
            MockProducer::failing(SignalName::Whois).delayed(Duration::from_millis(30)),
        ]);

        let outcome = orch.infer_collect("http://example.de").await;
        let last = outcome.events.last().unwrap();
        assert!(last.is_final_result());
        assert_eq!(last.distribution(), Some(&outcome.distribution));
        assert_eq!(outcome.events.iter().filter(|e| e.is_final_result()).count(), 1);

        let finals: Vec<&str> = outcome
            .events
            .iter()
            .filter(|e| e.signal == EventSignal::Final && e.kind == EventKind::Message)
            .filter_map(|e| e.text())
            .collect();
        assert_eq!(
            finals,
            vec![
                "awaiting results from 1 more producer(s).",
                "received all producer results."
            ]
        );

        let whois_error = outcome
            .events
            .iter()
            .find(|e| e.signal == EventSignal::Signal(SignalName::Whois) && e.kind == EventKind::Error)
            .unwrap();
        assert_eq!(whois_error.text(), Some("Mock failure"));

        // progress narration from both producers is surfaced
        let messages = outcome
            .events
            .iter()
            .filter(|e| matches!(e.signal, EventSignal::Signal(_)) && e.kind == EventKind::Message)
            .count();
        assert_eq!(messages, 2);
    }

    #[tokio::test]
    async fn test_zero_producers() {
        let orch = orchestrator(Vec::new());
        let outcome = orch.infer_collect("http://example.de").await;

        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.events[0].text(), Some("received all producer results."));
        assert!(outcome.events[1].is_final_result());
        assert!((outcome.distribution.total() - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unweighted_signal_reported() {
        let orch = orchestrator(vec![
            MockProducer::new(SignalName::Ip, dist("jp")),
            MockProducer::new(SignalName::Tld, dist("de")),
        ]);
        let outcome = orch.infer_collect("http://example.de").await;

        assert!(outcome
            .events
            .iter()
            .any(|e| e.text() == Some("no coefficient for signal ip (ip), result not weighted.")));
        // ip is surfaced as a raw result anyway
        assert!(outcome
            .events
            .iter()
            .any(|e| e.signal == EventSignal::Signal(SignalName::Ip) && e.kind == EventKind::Result));
        assert_eq!(outcome.distribution.ranked()[0].0, "de");
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let orch = EnsembleOrchestrator::builder()
            .producer(Arc::new(
                MockProducer::new(SignalName::Wikidata, dist("fr")).delayed(Duration::from_secs(30)),
            ))
            .producer(Arc::new(MockProducer::new(SignalName::Tld, dist("de"))))
            .producer_timeout(Some(Duration::from_millis(50)))
            .build()
            .unwrap();

        let outcome = orch.infer_collect("http://example.de").await;
        let error = outcome
            .events
            .iter()
            .find(|e| e.kind == EventKind::Error)
            .unwrap();
        assert_eq!(error.signal, EventSignal::Signal(SignalName::Wikidata));
        assert!(error.text().unwrap().starts_with("Timed out"));
        assert_eq!(outcome.distribution.ranked()[0].0, "de");
    }

    #[tokio::test]
    async fn test_stream_ends_after_final_result() {
        let orch = Arc::new(orchestrator(vec![
            MockProducer::new(SignalName::Prior, dist("us")),
            MockProducer::new(SignalName::Tld, dist("de")),
        ]));

        let events: Vec<InferenceEvent> = orch.infer_stream("http://example.de").collect().await;
        assert!(events.last().unwrap().is_final_result());
        assert_eq!(events.iter().filter(|e| e.is_final_result()).count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inferences_are_independent() {
        let orch = Arc::new(orchestrator(vec![
            MockProducer::new(SignalName::Tld, dist("de")).delayed(Duration::from_millis(20)),
        ]));

        let (a, b) = tokio::join!(
            orch.infer_collect("http://a.example"),
            orch.infer_collect("http://b.example")
        );
        assert_eq!(a.events.iter().filter(|e| e.is_final_result()).count(), 1);
        assert_eq!(b.events.iter().filter(|e| e.is_final_result()).count(), 1);
        assert_eq!(a.distribution, b.distribution);
    }
}
