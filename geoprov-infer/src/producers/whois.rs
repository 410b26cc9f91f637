//! WHOIS producer - country of the domain's registration record
//!
//! Two strategies, in order:
//! 1. **parsed** - structured extraction of a contact country field
//!    (admin, then tech, then registrant, then any other contact), followed by
//!    line heuristics for registries with unusual layouts.
//! 2. **freetext** - word-bounded country alias mentions counted over the
//!    whole record and normalised.
//!
//! The strategy that produced the result is reported as the evidence variant,
//! so each is weighted with its own coefficient.

use super::{ProducerError, ProgressReporter, SignalProducer};
use crate::catalog::{AliasResolver, CountryCatalog};
use crate::fusion::SignalEvidence;
use crate::utils::{registered_domain, url_host};
use async_trait::async_trait;
use geoprov_common::{CountryDistribution, SignalName};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Standard WHOIS port
pub const WHOIS_PORT: u16 = 43;

/// Referrals followed after the first query
pub const MAX_REFERRAL_DEPTH: usize = 3;

/// Largest record accepted from one server
const MAX_RECORD_BYTES: u64 = 1024 * 1024;

/// Coefficient key of structured extraction results
pub const VARIANT_PARSED: &str = "parsed";

/// Coefficient key of free-text scan results
pub const VARIANT_FREETEXT: &str = "freetext";

/// Raw WHOIS record retrieval
#[async_trait]
pub trait WhoisTransport: Send + Sync {
    /// Send `query` to `server` and return the raw response
    async fn query(&self, server: &str, query: &str) -> Result<String, ProducerError>;
}

/// WHOIS over TCP (RFC 3912)
#[derive(Debug, Clone)]
pub struct TcpWhoisTransport {
    port: u16,
    timeout: Duration,
}

impl TcpWhoisTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            port: WHOIS_PORT,
            timeout,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    async fn exchange(&self, server: &str, query: &str) -> Result<String, ProducerError> {
        let mut stream = TcpStream::connect((server, self.port)).await?;
        stream.write_all(format!("{}\r\n", query).as_bytes()).await?;

        let mut raw = Vec::new();
        (&mut stream).take(MAX_RECORD_BYTES).read_to_end(&mut raw).await?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

impl Default for TcpWhoisTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl WhoisTransport for TcpWhoisTransport {
    async fn query(&self, server: &str, query: &str) -> Result<String, ProducerError> {
        debug!(server = server, query = query, "WHOIS query");
        tokio::time::timeout(self.timeout, self.exchange(server, query))
            .await
            .map_err(|_| ProducerError::Timeout(self.timeout))?
    }
}

/// Contact role a country field belongs to, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ContactRole {
    Admin,
    Tech,
    Registrant,
    Other,
}

impl ContactRole {
    fn from_key(key: &str) -> Self {
        if key.contains("admin") {
            ContactRole::Admin
        } else if key.contains("tech") {
            ContactRole::Tech
        } else if key.contains("registrant") || key.contains("owner") || key.contains("holder") {
            ContactRole::Registrant
        } else {
            ContactRole::Other
        }
    }
}

pub struct WhoisProducer {
    transport: Arc<dyn WhoisTransport>,
    server: String,
    catalog: Arc<CountryCatalog>,
    aliases: &'static AliasResolver,
}

impl WhoisProducer {
    /// # Arguments
    /// * `transport` - Record retrieval (TCP in production)
    /// * `server` - First server queried; referrals are followed from there
    /// * `catalog` - Countries accepted from two-letter fields
    pub fn new(
        transport: Arc<dyn WhoisTransport>,
        server: impl Into<String>,
        catalog: Arc<CountryCatalog>,
    ) -> Self {
        Self {
            transport,
            server: server.into(),
            catalog,
            aliases: AliasResolver::builtin(),
        }
    }

    /// Fetch the record chain for a domain, following referrals
    ///
    /// The first server is the root: its reply only names the registry to ask
    /// and is kept only when it refers nowhere. A failing query before any
    /// domain record arrived is an error; a later failing referral keeps the
    /// records gathered so far.
    pub async fn retrieve_records(
        &self,
        domain: &str,
        progress: &ProgressReporter,
    ) -> Result<Vec<String>, ProducerError> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut server = self.server.to_lowercase();

        for depth in 0..=MAX_REFERRAL_DEPTH {
            visited.insert(server.clone());
            let record = match self.transport.query(&server, domain).await {
                Ok(record) => record,
                Err(e) if records.is_empty() => return Err(e),
                Err(e) => {
                    warn!(server = %server, error = %e, "WHOIS referral failed");
                    progress.message(format!("Whois referral to {} failed: {}", server, e));
                    break;
                }
            };
            let referral = find_referral(&record)
                .filter(|next| !visited.contains(next) && depth < MAX_REFERRAL_DEPTH);

            if depth > 0 || referral.is_none() {
                records.push(record);
            }

            match referral {
                Some(next) => {
                    debug!(from = %server, to = %next, "Following WHOIS referral");
                    server = next;
                }
                None => break,
            }
        }

        Ok(records)
    }

    /// Country code of the highest-priority contact country field
    pub fn extract_parsed(&self, records: &[String]) -> Option<String> {
        let mut best: Option<(ContactRole, String)> = None;

        for line in records.iter().flat_map(|r| r.lines()) {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            if !key.contains("country") || key.contains("registrar") {
                continue;
            }
            let Some(code) = self.normalize_country(value) else {
                continue;
            };
            let role = ContactRole::from_key(&key);
            if best.as_ref().map_or(true, |(current, _)| role < *current) {
                best = Some((role, code));
            }
        }

        best.map(|(_, code)| code).or_else(|| self.extract_by_heuristics(records))
    }

    /// Line heuristics for records without `key: value` contact blocks
    fn extract_by_heuristics(&self, records: &[String]) -> Option<String> {
        let lines: Vec<String> = records
            .iter()
            .flat_map(|r| r.lines())
            .map(str::to_lowercase)
            .collect();

        let admin_code = lines
            .iter()
            .filter(|l| l.contains("admin") && l.contains("country code"));
        let admin_country = lines.iter().filter(|l| l.contains("admin country"));

        admin_code.chain(admin_country).find_map(|line| {
            let mut tokens = line.split(':');
            let _ = tokens.next()?;
            let last = tokens.last()?;
            self.normalize_country(last)
        })
    }

    /// Normalised country mentions over the whole record chain
    pub fn extract_freetext(
        &self,
        records: &[String],
        progress: &ProgressReporter,
    ) -> CountryDistribution {
        let joined = records.join("\n");
        let counts = self.aliases.scan_mentions(&joined);

        let mut dist = CountryDistribution::new();
        for (iso, n) in &counts {
            progress.message(format!(
                "In whois record, found {} mention(s) of country {}",
                n, iso
            ));
            dist.insert(*iso, *n as f64);
        }
        dist.normalized()
    }

    /// Map a raw country field to a catalog ISO code
    ///
    /// Two-letter values must name a catalog country by ISO code or TLD
    /// (`uk` → `gb`); longer values go through the alias table.
    fn normalize_country(&self, raw: &str) -> Option<String> {
        let raw = raw.trim().to_lowercase();
        match raw.chars().count() {
            0 | 1 => None,
            2 => {
                if self.catalog.contains(&raw) {
                    Some(raw)
                } else {
                    self.catalog.by_tld(&raw).map(|c| c.iso_code.to_string())
                }
            }
            _ => self.aliases.lookup(&raw).map(str::to_string),
        }
    }
}

/// Next server named by a record (`refer:`, `whois:`, `Registrar WHOIS Server:`)
fn find_referral(record: &str) -> Option<String> {
    record.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        let key = key.trim().to_lowercase();
        if !matches!(
            key.as_str(),
            "refer" | "whois" | "whois server" | "registrar whois server"
        ) {
            return None;
        }
        let server = value
            .trim()
            .trim_start_matches("whois://")
            .trim_start_matches("rwhois://")
            .trim_end_matches('/')
            .to_lowercase();
        (!server.is_empty() && server.contains('.') && !server.contains(char::is_whitespace))
            .then_some(server)
    })
}

#[async_trait]
impl SignalProducer for WhoisProducer {
    fn name(&self) -> SignalName {
        SignalName::Whois
    }

    async fn produce(
        &self,
        url: &str,
        progress: &ProgressReporter,
    ) -> Result<SignalEvidence, ProducerError> {
        let domain = url_host(url)
            .and_then(|host| registered_domain(&host))
            .ok_or_else(|| ProducerError::InvalidUrl(url.to_string()))?;

        progress.message(format!("Queuing whois query for {}", domain));
        let records = self.retrieve_records(&domain, progress).await?;

        if let Some(iso) = self.extract_parsed(&records) {
            return Ok(SignalEvidence::with_variant(
                CountryDistribution::single(iso),
                VARIANT_PARSED,
            ));
        }

        progress.message("Structured parsing for whois record failed... attempting freetext parsing");
        let dist = self.extract_freetext(&records, progress);
        Ok(SignalEvidence::with_variant(dist, VARIANT_FREETEXT))
    }
}
