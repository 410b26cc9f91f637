//! TLD producer - country-code top-level domain of the host

use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::{country_to_distribution, CountryCatalog};
use crate::fusion::SignalEvidence;
use crate::utils::{top_level_label, url_host};
use async_trait::async_trait;
use geoprov_common::{CountryDistribution, SignalName};
use std::sync::Arc;

/// ccTLDs marketed for generic use; they say nothing about origin
pub const GENERIC_TLDS: &[&str] = &[
    "ad", "as", "bz", "cc", "cd", "co", "dj", "fm", "io", "la", "me", "ms", "nu", "sc", "sr",
    "su", "tv", "tk", "ws", "int",
];

/// US-only generic TLDs
const US_GOVERNMENT_TLDS: &[&str] = &["mil", "gov"];

pub struct TldProducer {
    catalog: Arc<CountryCatalog>,
}

impl TldProducer {
    pub fn new(catalog: Arc<CountryCatalog>) -> Self {
        Self { catalog }
    }

    /// Distribution for a host name
    pub fn infer_host(&self, host: &str, progress: &ProgressReporter) -> CountryDistribution {
        let Some(tld) = top_level_label(host) else {
            return CountryDistribution::new();
        };

        if US_GOVERNMENT_TLDS.contains(&tld) {
            progress.message("tld corresponds to US military or government domain.");
            return CountryDistribution::single("us");
        }

        if GENERIC_TLDS.contains(&tld) {
            progress.message(format!(".{} is a generic-use tld, no country inferred.", tld));
            return CountryDistribution::new();
        }

        let iso = self.catalog.by_tld(tld).map(|c| c.iso_code);
        country_to_distribution(iso)
    }
}

impl Default for TldProducer {
    fn default() -> Self {
        Self::new(CountryCatalog::shared())
    }
}

#[async_trait]
impl SignalProducer for TldProducer {
    fn name(&self) -> SignalName {
        SignalName::Tld
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let host = url_host(url).ok_or_else(|| ProducerError::InvalidUrl(url.to_string()))?;
        Ok(SignalEvidence::new(self.infer_host(&host, progress)))
    }
}
