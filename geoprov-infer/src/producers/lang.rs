//! Page language producer
//!
//! Fetches the page, detects its language and spreads the language over the
//! countries that speak it. A country whose `r`-th ranked language (from 0)
//! matches scores `prior / (r + 1)^2.5`; scores are normalised per language.

use super::http::{build_client, ensure_success, read_text_limited};
use super::language::detect_page_language;
use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::CountryCatalog;
use crate::fusion::SignalEvidence;
use crate::utils::absolute_url;
use async_trait::async_trait;
use geoprov_common::{CountryDistribution, SignalName};
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_LANGUAGE;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Decay of a language's weight with its rank within a country
const RANK_DECAY_EXPONENT: f64 = 2.5;

/// Added to each language's score sum before normalising
const NORMALIZATION_EPSILON: f64 = 1e-6;

static BUILTIN_TABLE: Lazy<Arc<LanguageCountryTable>> =
    Lazy::new(|| Arc::new(LanguageCountryTable::from_catalog(CountryCatalog::builtin())));

/// Language code → countries likely to publish in it
#[derive(Debug, Clone, Default)]
pub struct LanguageCountryTable {
    languages: HashMap<String, CountryDistribution>,
}

impl LanguageCountryTable {
    /// Table derived from the built-in catalog
    pub fn shared() -> Arc<LanguageCountryTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    pub fn from_catalog(catalog: &CountryCatalog) -> Self {
        let mut scores: HashMap<String, Vec<(&'static str, f64)>> = HashMap::new();
        for country in catalog.iter() {
            for (rank, language) in country.languages.iter().enumerate() {
                let score = country.prior / ((rank + 1) as f64).powf(RANK_DECAY_EXPONENT);
                scores
                    .entry(language.to_lowercase())
                    .or_default()
                    .push((country.iso_code, score));
            }
        }

        let languages: HashMap<String, CountryDistribution> = scores
            .into_iter()
            .map(|(language, countries)| {
                let total: f64 = countries.iter().map(|(_, s)| s).sum::<f64>() + NORMALIZATION_EPSILON;
                let dist: CountryDistribution = countries
                    .into_iter()
                    .map(|(iso, score)| (iso, score / total))
                    .collect();
                (language, dist)
            })
            .collect();

        Self { languages }
    }

    /// Countries for a language (`None` when no catalog country speaks it)
    pub fn get(&self, language: &str) -> Option<&CountryDistribution> {
        self.languages.get(&language.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

pub struct PageLangProducer {
    client: Client,
    table: Arc<LanguageCountryTable>,
}

impl PageLangProducer {
    pub fn new(table: Arc<LanguageCountryTable>, user_agent: &str) -> Result<Self, ProducerError> {
        Ok(Self {
            client: build_client(user_agent)?,
            table,
        })
    }
}

#[async_trait]
impl SignalProducer for PageLangProducer {
    fn name(&self) -> SignalName {
        SignalName::Lang
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let target = absolute_url(url).ok_or_else(|| ProducerError::InvalidUrl(url.to_string()))?;

        progress.message(format!("retrieving html to detect language of url {}", url));
        let response = ensure_success("Page", self.client.get(target).send().await?)?;
        let header = response
            .headers()
            .get(CONTENT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let html = read_text_limited(response).await?;

        let Some(detected) = detect_page_language(&html, header.as_deref()) else {
            return Err(ProducerError::NoData("No language inferred for URL.".to_string()));
        };
        debug!(language = %detected.code, source = ?detected.source, "Page language detected");
        progress.message(format!("Inferred language {}", detected.code));

        match self.table.get(&detected.code) {
            Some(dist) => Ok(SignalEvidence::new(dist.clone())),
            None => Err(ProducerError::NoData(format!(
                "Unknown language inferred for URL: {}",
                detected.code
            ))),
        }
    }
}
