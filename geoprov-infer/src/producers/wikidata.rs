//! Wikidata producer - reverse geocoding of organisation coordinates
//!
//! Organisation headquarters coordinates (harvested offline from Wikidata)
//! are keyed by registered domain. A hit is reverse geocoded through a
//! Nominatim-compatible endpoint, rate limited to one request per second.

use super::http::{
    build_client, ensure_success, per_second_limiter, read_text_limited, DirectRateLimiter,
};
use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::country_to_distribution;
use crate::fusion::SignalEvidence;
use crate::utils::{registered_domain, url_host};
use async_trait::async_trait;
use geoprov_common::{Error, SignalName};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Nominatim usage policy: at most one request per second
const NOMINATIM_REQUESTS_PER_SECOND: u32 = 1;

/// Registered domain → (latitude, longitude)
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    entries: HashMap<String, (f64, f64)>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from disk
    ///
    /// `.json` files hold an object `{"domain": "lat,lon"}`; anything else is
    /// read as TSV with one `domain<TAB>lat,lon` entry per line. Malformed TSV
    /// lines are skipped with a warning.
    pub fn load(path: &Path) -> geoprov_common::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let table = if is_json {
            Self::from_json(&content)
                .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?
        } else {
            Self::from_tsv(&content)
        };

        info!("Loaded {} wikidata coordinates from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn from_tsv(content: &str) -> Self {
        let mut table = Self::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed = line
                .split_once('\t')
                .and_then(|(domain, coords)| Some((domain.trim(), parse_coords(coords)?)));
            match parsed {
                Some((domain, coords)) if !domain.is_empty() => table.insert(domain, coords),
                _ => warn!(line = line_no + 1, "Invalid wikidata coordinate line: {:?}", line),
            }
        }
        table
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, String> = serde_json::from_str(content)?;
        let mut table = Self::new();
        for (domain, coords) in raw {
            match parse_coords(&coords) {
                Some(coords) => table.insert(&domain, coords),
                None => warn!(domain = %domain, "Invalid wikidata coordinates: {:?}", coords),
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, domain: &str, coords: (f64, f64)) {
        self.entries.insert(domain.trim().to_lowercase(), coords);
    }

    pub fn get(&self, domain: &str) -> Option<(f64, f64)> {
        self.entries.get(domain).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `"lat,lon"`
fn parse_coords(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.trim().split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    valid.then_some((lat, lon))
}

#[derive(Debug, Default, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    address: Option<ReverseGeocodeAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseGeocodeAddress {
    #[serde(default)]
    country_code: Option<String>,
}

pub struct WikidataProducer {
    coords: Arc<CoordinateTable>,
    client: Client,
    endpoint: String,
    rate_limiter: Arc<DirectRateLimiter>,
}

impl WikidataProducer {
    /// # Arguments
    /// * `coords` - Coordinate table keyed by registered domain
    /// * `endpoint` - Nominatim-compatible `/reverse` URL
    /// * `user_agent` - Identifying User-Agent (required by Nominatim)
    pub fn new(
        coords: Arc<CoordinateTable>,
        endpoint: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, ProducerError> {
        Ok(Self {
            coords,
            client: build_client(user_agent)?,
            endpoint: endpoint.into(),
            rate_limiter: per_second_limiter(NOMINATIM_REQUESTS_PER_SECOND),
        })
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<String>, ProducerError> {
        self.rate_limiter.until_ready().await;

        debug!(lat = lat, lon = lon, "Querying reverse geocoder");
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ])
            .send()
            .await?;
        let body = read_text_limited(ensure_success("Reverse geocoder", response)?).await?;

        let parsed: ReverseGeocodeResponse = serde_json::from_str(&body).map_err(|_| {
            ProducerError::UnexpectedResponse(format!(
                "Unexpected wikidata geocoding response: {}",
                truncate(&body, 200)
            ))
        })?;
        Ok(parsed.address.and_then(|a| a.country_code))
    }
}

#[async_trait]
impl SignalProducer for WikidataProducer {
    fn name(&self) -> SignalName {
        SignalName::Wikidata
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let domain = url_host(url)
            .and_then(|host| registered_domain(&host))
            .ok_or_else(|| ProducerError::InvalidUrl(url.to_string()))?;

        let Some((lat, lon)) = self.coords.get(&domain) else {
            progress.message("No wikidata coordinates found for url");
            return Ok(SignalEvidence::empty());
        };

        progress.message(format!(
            "Geocoding country for wikidata organization coordinates ({},{})...",
            lat, lon
        ));

        match self.reverse_geocode(lat, lon).await? {
            Some(code) => Ok(SignalEvidence::new(country_to_distribution(Some(&code)))),
            None => Err(ProducerError::UnexpectedResponse(
                "Unexpected wikidata geocoding response: no address.country_code".to_string(),
            )),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use crate::producers::http::MAX_BODY_BYTES;
    use geoprov_common::CountryDistribution;
    use std::io::Write;

    async fn spawn_geocoder(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/reverse", addr)
    }

    fn table() -> Arc<CoordinateTable> {
        let mut table = CoordinateTable::new();
        table.insert("porsche.com", (48.8342, 9.1522));
        Arc::new(table)
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("48.8342,9.1522"), Some((48.8342, 9.1522)));
        assert_eq!(parse_coords(" -33.9 , 151.2 "), Some((-33.9, 151.2)));
        assert_eq!(parse_coords("91,0"), None);
        assert_eq!(parse_coords("abc"), None);
    }

    #[test]
    fn test_load_tsv_and_json() {
        let dir = tempfile::TempDir::new().unwrap();

        let tsv = dir.path().join("coords.tsv");
        let mut f = std::fs::File::create(&tsv).unwrap();
        writeln!(f, "porsche.com\t48.8342,9.1522").unwrap();
        writeln!(f, "broken line").unwrap();
        writeln!(f, "BBC.co.uk\t51.5,-0.12").unwrap();
        let table = CoordinateTable::load(&tsv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("bbc.co.uk"), Some((51.5, -0.12)));

        let json = dir.path().join("coords.json");
        std::fs::write(&json, r#"{"unesco.org": "48.8494,2.3063"}"#).unwrap();
        let table = CoordinateTable::load(&json).unwrap();
        assert_eq!(table.get("unesco.org"), Some((48.8494, 2.3063)));

        std::fs::write(&json, "[1, 2").unwrap();
        assert!(CoordinateTable::load(&json).is_err());
    }

    #[tokio::test]
    async fn test_missing_coordinates_is_empty_result() {
        let producer =
            WikidataProducer::new(table(), "http://127.0.0.1:9/reverse", "geoprov-test").unwrap();
        let (progress, mut rx) = ProgressReporter::channel(SignalName::Wikidata);

        let evidence = producer.produce("http://example.org", &progress).await.unwrap();
        assert!(evidence.distribution.is_empty());
        match rx.try_recv() {
            Ok(crate::producers::ProducerReport::Message { text, .. }) => {
                assert_eq!(text, "No wikidata coordinates found for url")
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reverse_geocoded_country() {
        let app = Router::new().route(
            "/reverse",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("format").map(String::as_str), Some("json"));
                assert!(params.contains_key("lat") && params.contains_key("lon"));
                Json(serde_json::json!({"address": {"country": "Deutschland", "country_code": "de"}}))
            }),
        );
        let endpoint = spawn_geocoder(app).await;
        let producer = WikidataProducer::new(table(), endpoint, "geoprov-test").unwrap();

        let evidence = producer
            .produce("https://www.porsche.com/germany", &ProgressReporter::detached(SignalName::Wikidata))
            .await
            .unwrap();
        assert_eq!(evidence.distribution, CountryDistribution::single("de"));
    }

    #[tokio::test]
    async fn test_oversized_response_is_rejected() {
        let app = Router::new().route(
            "/reverse",
            get(|| async {
                Json(serde_json::json!({
                    "address": {"country_code": "de"},
                    "display_name": "x".repeat(MAX_BODY_BYTES),
                }))
            }),
        );
        let endpoint = spawn_geocoder(app).await;
        let producer = WikidataProducer::new(table(), endpoint, "geoprov-test").unwrap();

        let result = producer
            .produce("porsche.com", &ProgressReporter::detached(SignalName::Wikidata))
            .await;
        assert!(matches!(result, Err(ProducerError::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn test_unexpected_response_fails() {
        let app = Router::new().route(
            "/reverse",
            get(|| async { Json(serde_json::json!({"error": "Unable to geocode"})) }),
        );
        let endpoint = spawn_geocoder(app).await;
        let producer = WikidataProducer::new(table(), endpoint, "geoprov-test").unwrap();

        let result = producer
            .produce("porsche.com", &ProgressReporter::detached(SignalName::Wikidata))
            .await;
        assert!(matches!(result, Err(ProducerError::UnexpectedResponse(_))));
    }
}
