//! URL → host and registered-domain helpers

use std::net::IpAddr;

/// Second-level labels that registries use under a country-code TLD
const SECOND_LEVEL_LABELS: &[&str] = &[
    "co", "com", "ac", "gov", "org", "net", "edu", "ne", "or", "go", "gv", "nic", "ltd", "plc",
    "sch", "mil",
];

/// Parse a URL, treating a missing scheme as `http://`
///
/// Bare domains such as `www.ibm.com/foo` are accepted.
pub fn absolute_url(raw: &str) -> Option<url::Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains("://") {
        url::Url::parse(raw).ok()
    } else {
        url::Url::parse(&format!("http://{}", raw)).ok()
    }
}

/// Lowercased host of a URL (scheme optional)
pub fn url_host(raw: &str) -> Option<String> {
    let parsed = absolute_url(raw)?;
    let host = parsed.host_str()?.trim_end_matches('.').to_lowercase();
    // IPv6 literals come back bracketed
    let host = host.trim_start_matches('[').trim_end_matches(']').to_string();
    (!host.is_empty()).then_some(host)
}

/// Check that a caller-supplied URL names a host, returning it trimmed
pub fn validate_target(raw: &str) -> geoprov_common::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(geoprov_common::Error::InvalidInput("url must not be empty".to_string()));
    }
    match url_host(trimmed) {
        Some(_) => Ok(trimmed.to_string()),
        None => Err(geoprov_common::Error::InvalidInput(format!(
            "url has no host: {}",
            trimmed
        ))),
    }
}

/// Registered domain of a host (`foo.bbc.co.uk` → `bbc.co.uk`)
///
/// Keeps three labels when the second-to-last label is a common registry
/// label under a two-letter TLD, otherwise two. IP literals are returned as-is.
pub fn registered_domain(host: &str) -> Option<String> {
    let host = host.trim().trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return None;
    }
    if host.parse::<IpAddr>().is_ok() {
        return Some(host);
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let keep = match labels.as_slice() {
        [] => return None,
        [_] => 1,
        [.., second, tld] if tld.len() == 2 && SECOND_LEVEL_LABELS.contains(second) => 3,
        _ => 2,
    };
    let start = labels.len().saturating_sub(keep);
    Some(labels[start..].join("."))
}

/// Last label of a host (`www.example.de` → `de`)
pub fn top_level_label(host: &str) -> Option<&str> {
    host.trim_end_matches('.').rsplit('.').next().filter(|l| !l.is_empty())
}
