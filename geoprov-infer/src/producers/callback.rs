//! Callback-style producer adapter
//!
//! Wraps a producer written against `(url, on_result, on_message, on_error)`
//! callbacks into a [`SignalProducer`]. The callbacks share one single-fire
//! guard: the first terminal call wins and every later terminal call is
//! dropped with a warning. A producer that lets all of its callbacks go
//! without reporting is turned into a failure.

use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::fusion::SignalEvidence;
use async_trait::async_trait;
use geoprov_common::{CountryDistribution, SignalName};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tracing::warn;

type Outcome = Result<SignalEvidence, ProducerError>;

/// Callbacks handed to a callback-style producer
///
/// Cheap to clone; clones share the same single-fire guard, so a producer may
/// move them into spawned tasks.
#[derive(Clone)]
pub struct SignalCallbacks {
    progress: ProgressReporter,
    terminal: Arc<Mutex<Option<oneshot::Sender<Outcome>>>>,
}

impl SignalCallbacks {
    fn new(progress: ProgressReporter, tx: oneshot::Sender<Outcome>) -> Self {
        Self {
            progress,
            terminal: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Report success
    pub fn on_result(&self, distribution: CountryDistribution) {
        self.fire(Ok(SignalEvidence::new(distribution)));
    }

    /// Report success under a coefficient variant
    pub fn on_result_with_variant(&self, distribution: CountryDistribution, variant: &str) {
        self.fire(Ok(SignalEvidence::with_variant(distribution, variant)));
    }

    /// Report progress (never completes the producer)
    pub fn on_message(&self, text: impl Into<String>) {
        self.progress.message(text);
    }

    /// Report failure
    pub fn on_error(&self, detail: impl Into<String>) {
        self.fire(Err(ProducerError::NoData(detail.into())));
    }

    /// True once a terminal callback has fired
    pub fn is_settled(&self) -> bool {
        self.lock_terminal().is_none()
    }

    fn fire(&self, outcome: Outcome) {
        let sender = self.lock_terminal().take();
        match sender {
            Some(tx) => {
                // Receiver dropped: the inference no longer waits for us
                let _ = tx.send(outcome);
            }
            None => {
                let kind = if outcome.is_ok() { "result" } else { "error" };
                warn!(
                    signal = %self.progress.signal(),
                    kind = kind,
                    "Producer reported more than one terminal outcome, ignoring"
                );
            }
        }
    }

    fn lock_terminal(&self) -> MutexGuard<'_, Option<oneshot::Sender<Outcome>>> {
        match self.terminal.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

type CallbackFn = dyn Fn(String, SignalCallbacks) + Send + Sync;

/// [`SignalProducer`] backed by a callback-style function
pub struct CallbackProducer {
    name: SignalName,
    callback: Arc<CallbackFn>,
}

impl CallbackProducer {
    /// Wrap a callback-style producer
    ///
    /// The function is called once per URL. It may report synchronously or
    /// move the callbacks into spawned tasks and report later.
    pub fn new<F>(name: SignalName, callback: F) -> Self
    where
        F: Fn(String, SignalCallbacks) + Send + Sync + 'static,
    {
        Self {
            name,
            callback: Arc::new(callback),
        }
    }
}

#[async_trait]
impl SignalProducer for CallbackProducer {
    fn name(&self) -> SignalName {
        self.name
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let (tx, rx) = oneshot::channel();
        let callbacks = SignalCallbacks::new(progress.clone(), tx);
        (self.callback)(url.to_string(), callbacks);

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(signal = %self.name, "Producer released its callbacks without reporting");
                Err(ProducerError::ContractViolation(
                    "producer finished without reporting".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producers::ProducerReport;
    use std::time::Duration;

    async fn run(producer: &CallbackProducer) -> Outcome {
        producer
            .produce("http://example.de", &ProgressReporter::detached(producer.name()))
            .await
    }

    #[tokio::test]
    async fn test_synchronous_result() {
        let producer = CallbackProducer::new(SignalName::Tld, |_url, cb| {
            cb.on_result(CountryDistribution::single("de"));
        });
        let evidence = run(&producer).await.unwrap();
        assert_eq!(evidence.distribution.get("de"), 1.0);
        assert!(evidence.variant.is_none());
    }

    #[tokio::test]
    async fn test_first_terminal_call_wins() {
        let producer = CallbackProducer::new(SignalName::Tld, |_url, cb| {
            cb.on_result(CountryDistribution::single("de"));
            cb.on_error("too late");
            cb.on_result(CountryDistribution::single("fr"));
        });
        let evidence = run(&producer).await.unwrap();
        assert_eq!(evidence.distribution, CountryDistribution::single("de"));
    }

    #[tokio::test]
    async fn test_error_then_result_is_error() {
        let producer = CallbackProducer::new(SignalName::Ip, |_url, cb| {
            cb.on_error("lookup failed");
            cb.on_result(CountryDistribution::single("us"));
        });
        let err = run(&producer).await.unwrap_err();
        assert_eq!(err.to_string(), "lookup failed");
    }

    #[tokio::test]
    async fn test_no_terminal_call_is_contract_violation() {
        let producer = CallbackProducer::new(SignalName::Lang, |_url, cb| {
            cb.on_message("thinking about it");
        });
        let err = run(&producer).await.unwrap_err();
        assert!(matches!(err, ProducerError::ContractViolation(_)));
    }

    #[tokio::test]
    async fn test_deferred_result_from_spawned_task() {
        let producer = CallbackProducer::new(SignalName::Whois, |url, cb| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                cb.on_message(format!("looked up {}", url));
                cb.on_result_with_variant(CountryDistribution::single("nl"), "parsed");
            });
        });

        let (progress, mut rx) = ProgressReporter::channel(SignalName::Whois);
        let evidence = producer.produce("http://example.nl", &progress).await.unwrap();
        assert_eq!(evidence.variant.as_deref(), Some("parsed"));

        match rx.recv().await {
            Some(ProducerReport::Message { text, .. }) => {
                assert_eq!(text, "looked up http://example.nl")
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_is_settled_tracks_guard() {
        let (tx, _rx) = oneshot::channel();
        let callbacks = SignalCallbacks::new(ProgressReporter::detached(SignalName::Tld), tx);
        let clone = callbacks.clone();
        assert!(!callbacks.is_settled());
        clone.on_result(CountryDistribution::new());
        assert!(callbacks.is_settled());
    }
}
