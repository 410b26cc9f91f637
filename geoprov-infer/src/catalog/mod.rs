//! Country catalog
//!
//! Static reference data shared read-only by every other component: one entry
//! per country with its ISO code, TLD, ranked languages and prior probability.
//! The catalog is built once from [`data::COUNTRY_TABLE`] and never mutated.

pub mod aliases;
pub mod data;

pub use aliases::{country_to_distribution, AliasResolver};
pub use data::{CountryRecord, COUNTRY_TABLE};

use geoprov_common::CountryDistribution;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Share of probability mass spread evenly over all countries when deriving priors
const PRIOR_SMOOTHING: f64 = 0.01;

static BUILTIN_CATALOG: Lazy<Arc<CountryCatalog>> =
    Lazy::new(|| Arc::new(CountryCatalog::from_records(COUNTRY_TABLE)));

/// Immutable country entry
#[derive(Debug, Clone, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (lowercase)
    pub iso_code: &'static str,
    pub name: &'static str,
    /// Country-code TLD without the leading dot ("uk" for gb)
    pub tld: &'static str,
    /// Spoken languages ranked by prominence
    pub languages: &'static [&'static str],
    /// Prior probability of a web resource originating in this country
    pub prior: f64,
}

/// Insertion-ordered, read-only country catalog
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    countries: Vec<Country>,
    by_iso: HashMap<&'static str, usize>,
    by_tld: HashMap<&'static str, usize>,
}

impl CountryCatalog {
    /// Catalog compiled into the binary
    pub fn builtin() -> &'static CountryCatalog {
        &BUILTIN_CATALOG
    }

    /// Shared handle to the built-in catalog
    pub fn shared() -> Arc<CountryCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// Build a catalog from raw rows, deriving priors from web weights
    ///
    /// Weights are normalised to sum to 1, then 1% of the mass is spread evenly
    /// over all countries and the result renormalised, so every country keeps a
    /// non-zero prior.
    pub fn from_records(records: &[CountryRecord]) -> Self {
        let total_weight: f64 = records.iter().map(|r| r.web_weight.max(0.0)).sum();
        let smoothing = if records.is_empty() {
            0.0
        } else {
            PRIOR_SMOOTHING / records.len() as f64
        };

        let mut countries = Vec::with_capacity(records.len());
        let mut by_iso = HashMap::with_capacity(records.len());
        let mut by_tld = HashMap::with_capacity(records.len());

        for record in records {
            if by_iso.contains_key(record.iso) {
                continue;
            }
            let share = if total_weight > 0.0 {
                record.web_weight.max(0.0) / total_weight
            } else {
                0.0
            };
            let index = countries.len();
            countries.push(Country {
                iso_code: record.iso,
                name: record.name,
                tld: record.tld,
                languages: record.languages,
                prior: (share + smoothing) / (1.0 + PRIOR_SMOOTHING),
            });
            by_iso.insert(record.iso, index);
            by_tld.entry(record.tld).or_insert(index);
        }

        Self {
            countries,
            by_iso,
            by_tld,
        }
    }

    pub fn get(&self, iso_code: &str) -> Option<&Country> {
        self.by_iso.get(iso_code).map(|&i| &self.countries[i])
    }

    pub fn contains(&self, iso_code: &str) -> bool {
        self.by_iso.contains_key(iso_code)
    }

    /// Country owning a ccTLD (without the leading dot)
    pub fn by_tld(&self, tld: &str) -> Option<&Country> {
        self.by_tld.get(tld).map(|&i| &self.countries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Prior probability of every country
    pub fn priors(&self) -> CountryDistribution {
        self.countries
            .iter()
            .map(|c| (c.iso_code, c.prior))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_TABLE: &[CountryRecord] = &[
        CountryRecord { iso: "us", name: "United States", tld: "us", languages: &["en", "es"], web_weight: 3.0 },
        CountryRecord { iso: "gb", name: "United Kingdom", tld: "uk", languages: &["en"], web_weight: 1.0 },
        CountryRecord { iso: "aq", name: "Antarctica", tld: "aq", languages: &[], web_weight: 0.0 },
    ];

    #[test]
    fn test_builtin_catalog_loaded() {
        let catalog = CountryCatalog::builtin();
        assert!(catalog.len() > 200);
        assert_eq!(catalog.get("de").unwrap().name, "Germany");
        assert_eq!(catalog.by_tld("uk").unwrap().iso_code, "gb");
        assert!(catalog.get("uk").is_none());
    }

    #[test]
    fn test_builtin_priors_sum_to_one() {
        let priors = CountryCatalog::builtin().priors();
        assert!((priors.total() - 1.0).abs() < 1e-9);
        assert!(priors.iter().all(|(_, p)| p > 0.0));
        assert_eq!(priors.ranked()[0].0, "us");
    }

    #[test]
    fn test_prior_smoothing() {
        let catalog = CountryCatalog::from_records(SMALL_TABLE);
        let k = 0.01 / 3.0;
        assert!((catalog.get("us").unwrap().prior - (0.75 + k) / 1.01).abs() < 1e-12);
        assert!((catalog.get("gb").unwrap().prior - (0.25 + k) / 1.01).abs() < 1e-12);
        assert!((catalog.get("aq").unwrap().prior - k / 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = CountryCatalog::from_records(SMALL_TABLE);
        let codes: Vec<&str> = catalog.iter().map(|c| c.iso_code).collect();
        assert_eq!(codes, vec!["us", "gb", "aq"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CountryCatalog::from_records(&[]);
        assert!(catalog.is_empty());
        assert!(catalog.priors().is_empty());
    }
}
