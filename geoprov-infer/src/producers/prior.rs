//! Prior producer - catalog priors, independent of the URL

use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::CountryCatalog;
use crate::fusion::SignalEvidence;
use async_trait::async_trait;
use geoprov_common::SignalName;
use std::sync::Arc;

pub struct PriorProducer {
    catalog: Arc<CountryCatalog>,
}

impl PriorProducer {
    pub fn new(catalog: Arc<CountryCatalog>) -> Self {
        Self { catalog }
    }
}

impl Default for PriorProducer {
    fn default() -> Self {
        Self::new(CountryCatalog::shared())
    }
}

#[async_trait]
impl SignalProducer for PriorProducer {
    fn name(&self) -> SignalName {
        SignalName::Prior
    }

    async fn produce(
        &self,
        _url: &str,
        _progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        Ok(SignalEvidence::new(self.catalog.priors()))
    }
}
