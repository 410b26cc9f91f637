//! Signal Producers
//!
//! Implements 6 independent producers for concurrent execution.
//! Each producer implements the [`SignalProducer`] trait and reports one
//! country distribution per URL.
//!
//! # Producers
//! 1. **prior** - Catalog priors, unconditionally
//! 2. **tld** - Country-code top-level domain
//! 3. **wikidata** - Reverse geocoding of organisation coordinates
//! 4. **ip** - Geolocation of the server address
//! 5. **whois** - Registration record (structured fields, then free text)
//! 6. **lang** - Language of the fetched page
//!
//! # Contract
//! A producer yields exactly one terminal outcome (success or failure) and any
//! number of progress messages before it. Failures never abort the ensemble;
//! the orchestrator records them as "no information".

pub mod callback;
pub mod http;
pub mod ip;
pub mod lang;
pub mod language;
pub mod prior;
pub mod tld;
pub mod whois;
pub mod wikidata;

pub use callback::{CallbackProducer, SignalCallbacks};
pub use ip::IpProducer;
pub use lang::{LanguageCountryTable, PageLangProducer};
pub use prior::PriorProducer;
pub use tld::TldProducer;
pub use whois::{TcpWhoisTransport, WhoisProducer, WhoisTransport};
pub use wikidata::{CoordinateTable, WikidataProducer};

use crate::fusion::SignalEvidence;
use async_trait::async_trait;
use geoprov_common::SignalName;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Producer failure (recovered locally as "no information")
#[derive(Debug, Error)]
pub enum ProducerError {
    /// URL could not be parsed or has no usable host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket / DNS error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote service answered with something unusable
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Nothing to infer from
    #[error("{0}")]
    NoData(String),

    /// Producer exceeded its deadline
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Producer broke the reporting contract
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Message from a running producer to the orchestrator
#[derive(Debug)]
pub enum ProducerReport {
    /// Progress narration, no effect on the join
    Message { signal: SignalName, text: String },
    /// Terminal outcome
    Finished {
        signal: SignalName,
        outcome: Result<SignalEvidence, ProducerError>,
    },
}

/// Handle a producer uses to narrate progress
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    signal: SignalName,
    tx: Option<mpsc::UnboundedSender<ProducerReport>>,
}

impl ProgressReporter {
    pub fn new(signal: SignalName, tx: mpsc::UnboundedSender<ProducerReport>) -> Self {
        Self {
            signal,
            tx: Some(tx),
        }
    }

    /// Reporter that only logs (for running a producer on its own)
    pub fn detached(signal: SignalName) -> Self {
        Self { signal, tx: None }
    }

    /// Reporter paired with a receiver, for observing messages directly
    pub fn channel(signal: SignalName) -> (Self, mpsc::UnboundedReceiver<ProducerReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(signal, tx), rx)
    }

    pub fn signal(&self) -> SignalName {
        self.signal
    }

    /// Surface a progress message
    pub fn message(&self, text: impl Into<String>) {
        let text = text.into();
        debug!(signal = %self.signal, "{}", text);
        if let Some(tx) = &self.tx {
            // Receiver gone means the inference already finished
            let _ = tx.send(ProducerReport::Message {
                signal: self.signal,
                text,
            });
        }
    }
}

/// Signal producer trait - all producers implement this
///
/// # Example
/// ```rust,ignore
/// struct FixedProducer;
///
/// #[async_trait::async_trait]
/// impl SignalProducer for FixedProducer {
///     fn name(&self) -> SignalName { SignalName::Tld }
///
///     async fn produce(&self, _url: &str, progress: &ProgressReporter)
///         -> Result<SignalEvidence, ProducerError>
///     {
///         progress.message("always germany");
///         Ok(SignalEvidence::new(CountryDistribution::single("de")))
///     }
/// }
/// ```
#[async_trait]
pub trait SignalProducer: Send + Sync {
    /// Signal this producer reports under
    fn name(&self) -> SignalName;

    /// Infer a country distribution for a URL
    ///
    /// # Returns
    /// * `Ok(SignalEvidence)` - Distribution (possibly empty)
    /// * `Err(ProducerError)` - Could not determine a distribution (recorded as empty)
    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError>;
}

/// Registered producer: signal name plus implementation
#[derive(Clone)]
pub struct ProducerDescriptor {
    pub name: SignalName,
    pub producer: Arc<dyn SignalProducer>,
}

impl ProducerDescriptor {
    pub fn new(producer: Arc<dyn SignalProducer>) -> Self {
        Self {
            name: producer.name(),
            producer,
        }
    }
}

impl std::fmt::Debug for ProducerDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

// ============================================================================
// Mock Producers for Testing
// ============================================================================
