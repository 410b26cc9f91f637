//! Distribution Combiner - logistic fusion of per-signal distributions
//!
//! Every catalog country starts at the model intercept; each recorded signal
//! adds `weight * coefficient` for the countries it mentions. Scores go through
//! the logistic function, are raised to the calibration exponent and finally
//! normalised into a posterior over the whole catalog.

use crate::catalog::CountryCatalog;
use geoprov_common::config::ModelConfig;
use geoprov_common::{CountryDistribution, SignalName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Fitted intercept of the logistic model
pub const DEFAULT_INTERCEPT: f64 = -7.06;

/// Power applied to logistic outputs before normalisation (calibrates confidence)
pub const DEFAULT_CALIBRATION_EXPONENT: f64 = 1.2;

/// Fitted coefficients per coefficient key
pub const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("prior", 2.38),
    ("parsed", 5.39),
    ("freetext", 2.06),
    ("wikidata", 2.03),
    ("lang", 5.37),
    ("tld", 7.03),
];

/// Evidence recorded for one signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalEvidence {
    pub distribution: CountryDistribution,
    /// Qualifier chosen by the producer (e.g. "parsed" / "freetext" for WHOIS);
    /// replaces the signal name as coefficient key when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl SignalEvidence {
    pub fn new(distribution: CountryDistribution) -> Self {
        Self {
            distribution,
            variant: None,
        }
    }

    /// Evidence weighted under a producer-chosen coefficient key
    pub fn with_variant(distribution: CountryDistribution, variant: impl Into<String>) -> Self {
        Self {
            distribution,
            variant: Some(variant.into()),
        }
    }

    /// Evidence of a failed producer
    pub fn empty() -> Self {
        Self::default()
    }

    /// Key under which this evidence is weighted
    pub fn coefficient_key<'a>(&'a self, signal: &SignalName) -> &'a str {
        self.variant.as_deref().unwrap_or_else(|| signal.as_str())
    }
}

/// Partial results of one inference, keyed (and therefore ordered) by signal
pub type PartialResults = BTreeMap<SignalName, SignalEvidence>;

/// Logistic model: intercept, calibration exponent and one weight per coefficient key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub calibration_exponent: f64,
    pub weights: BTreeMap<String, f64>,
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self {
            intercept: DEFAULT_INTERCEPT,
            calibration_exponent: DEFAULT_CALIBRATION_EXPONENT,
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|&(key, weight)| (key.to_string(), weight))
                .collect(),
        }
    }
}

impl From<&ModelConfig> for ModelCoefficients {
    fn from(config: &ModelConfig) -> Self {
        Self {
            intercept: config.intercept,
            calibration_exponent: config.calibration_exponent,
            weights: config.weights.clone(),
        }
    }
}

impl ModelCoefficients {
    /// Coefficient for a key, if the model knows it
    pub fn weight(&self, key: &str) -> Option<f64> {
        self.weights.get(key).copied()
    }

    /// Builder-style weight override
    pub fn with_weight(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(key.into(), weight);
        self
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    /// Signals with evidence whose coefficient key has no weight (excluded from the sum)
    ///
    /// Empty evidence contributes nothing either way and is not listed.
    pub fn unweighted_signals(&self, partials: &PartialResults) -> Vec<(SignalName, String)> {
        partials
            .iter()
            .filter(|(_, evidence)| !evidence.distribution.is_empty())
            .filter(|(name, evidence)| self.weight(evidence.coefficient_key(name)).is_none())
            .map(|(name, evidence)| (*name, evidence.coefficient_key(name).to_string()))
            .collect()
    }
}

/// Logistic function `1 / (1 + e^-x)`
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Fuse partial results into one posterior over the catalog
///
/// # Arguments
/// * `partials` - Evidence per signal (failed signals carry an empty distribution)
/// * `coefficients` - Logistic model
/// * `catalog` - Countries that make up the output
///
/// # Returns
/// Distribution over exactly the catalog's countries summing to 1, or the
/// uniform distribution when the calibrated scores cannot be normalised.
pub fn combine(
    partials: &PartialResults,
    coefficients: &ModelCoefficients,
    catalog: &CountryCatalog,
) -> CountryDistribution {
    let mut scores: BTreeMap<&'static str, f64> = catalog
        .iter()
        .map(|c| (c.iso_code, coefficients.intercept))
        .collect();

    // BTreeMap iteration: fixed signal order regardless of arrival order
    for (signal, evidence) in partials {
        let key = evidence.coefficient_key(signal);
        let Some(coefficient) = coefficients.weight(key) else {
            debug!(signal = %signal, key = key, "No coefficient, signal excluded from combination");
            continue;
        };
        for (country, weight) in evidence.distribution.iter() {
            if let Some(score) = scores.get_mut(country) {
                *score += weight * coefficient;
            }
        }
    }

    let calibrated: Vec<(&'static str, f64)> = catalog
        .iter()
        .map(|c| {
            let score = scores.get(c.iso_code).copied().unwrap_or(coefficients.intercept);
            (c.iso_code, logistic(score).powf(coefficients.calibration_exponent))
        })
        .collect();

    let total: f64 = calibrated.iter().map(|(_, p)| p).sum();
    if !(total > 0.0 && total.is_finite()) {
        if !catalog.is_empty() {
            warn!(total = total, "Degenerate normalisation, falling back to uniform distribution");
        }
        return uniform(catalog);
    }

    calibrated
        .into_iter()
        .map(|(iso, p)| (iso, p / total))
        .collect()
}

/// Uniform distribution over the catalog
pub fn uniform(catalog: &CountryCatalog) -> CountryDistribution {
    let n = catalog.len() as f64;
    catalog.iter().map(|c| (c.iso_code, 1.0 / n)).collect()
}

/// The `n` most probable countries, ties broken by code
pub fn top_countries(distribution: &CountryDistribution, n: usize) -> Vec<(String, f64)> {
    let mut ranked = distribution.ranked();
    ranked.truncate(n);
    ranked
}
