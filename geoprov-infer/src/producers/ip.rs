//! IP producer - geolocation of the server's address
//!
//! Unreliable (CDNs, hosting providers) but better than nothing. The host is
//! resolved locally and the address looked up at `<endpoint>/<ip>`.

use super::http::{build_client, ensure_success, read_text_limited};
use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::country_to_distribution;
use crate::fusion::SignalEvidence;
use crate::utils::url_host;
use async_trait::async_trait;
use geoprov_common::SignalName;
use reqwest::Client;
use serde::Deserialize;
use std::net::IpAddr;
use tracing::debug;

/// Geolocation response; accepts both `country_code` and `countryCode`
#[derive(Debug, Default, Deserialize)]
struct IpGeolocationResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "countryCode")]
    country_code: Option<String>,
}

pub struct IpProducer {
    client: Client,
    endpoint: String,
}

impl IpProducer {
    /// # Arguments
    /// * `endpoint` - Base URL; the address is appended as a path segment
    /// * `user_agent` - User-Agent for outbound requests
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self, ProducerError> {
        Ok(Self {
            client: build_client(user_agent)?,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    async fn geolocate(&self, ip: IpAddr) -> Result<Option<String>, ProducerError> {
        let url = format!("{}/{}", self.endpoint, ip);
        debug!(ip = %ip, "Querying IP geolocation service");

        let response = ensure_success("IP geolocation", self.client.get(&url).send().await?)?;
        let body = read_text_limited(response).await?;
        let parsed: IpGeolocationResponse = serde_json::from_str(&body).map_err(|_| {
            ProducerError::UnexpectedResponse(format!(
                "Unexpected server geocoding response: {}",
                body.chars().take(200).collect::<String>()
            ))
        })?;

        if parsed.status.as_deref() == Some("fail") {
            return Err(ProducerError::UnexpectedResponse(format!(
                "Server geocoding failed: {}",
                parsed.message.unwrap_or_else(|| "unknown reason".to_string())
            )));
        }
        Ok(parsed.country_code.map(|code| normalize_code(&code)))
    }
}

/// Lowercase, mapping the `uk` TLD spelling to ISO `gb`
fn normalize_code(raw: &str) -> String {
    let code = raw.trim().to_lowercase();
    if code == "uk" {
        "gb".to_string()
    } else {
        code
    }
}

/// Resolve a host to one address, preferring IPv4
pub async fn resolve_host(host: &str) -> Result<IpAddr, ProducerError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }
    let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, 80))
        .await?
        .map(|addr| addr.ip())
        .collect();
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ProducerError::NoData(format!("Host {} did not resolve", host)))
}

#[async_trait]
impl SignalProducer for IpProducer {
    fn name(&self) -> SignalName {
        SignalName::Ip
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let host = url_host(url).ok_or_else(|| ProducerError::InvalidUrl(url.to_string()))?;

        progress.message("Geocoding server hostname...");
        let ip = resolve_host(&host).await?;

        match self.geolocate(ip).await? {
            Some(code) => Ok(SignalEvidence::new(country_to_distribution(Some(&code)))),
            None => Err(ProducerError::UnexpectedResponse(
                "Unexpected server geocoding response: no country code".to_string(),
            )),
        }
    }
}
