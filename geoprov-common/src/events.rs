//! Event types for the geoprov inference stream
//!
//! Every inference call produces a stream of [`InferenceEvent`]s tagged with the
//! signal that raised them (or `final` for the orchestrator itself), the event
//! kind, and a payload. Exactly one `final`/`result` event closes each stream.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Registered signal types
///
/// The declaration order is also the order in which the combiner visits
/// signals, which keeps the floating-point reduction independent of the order
/// producers happen to finish in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalName {
    Prior,
    Tld,
    Wikidata,
    Ip,
    Whois,
    Lang,
}

impl SignalName {
    /// All signal names in declaration order
    pub const ALL: [SignalName; 6] = [
        SignalName::Prior,
        SignalName::Tld,
        SignalName::Wikidata,
        SignalName::Ip,
        SignalName::Whois,
        SignalName::Lang,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalName::Prior => "prior",
            SignalName::Tld => "tld",
            SignalName::Wikidata => "wikidata",
            SignalName::Ip => "ip",
            SignalName::Whois => "whois",
            SignalName::Lang => "lang",
        }
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalName {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown signal name: {}", s)))
    }
}

/// Mapping from ISO country code to a non-negative weight
///
/// Individual signals are not required to sum to 1; the combined posterior is.
/// Absent keys carry an implicit weight of 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryDistribution(BTreeMap<String, f64>);

impl CountryDistribution {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Distribution placing all weight on one country
    pub fn single(code: impl Into<String>) -> Self {
        let mut dist = Self::new();
        dist.insert(code, 1.0);
        dist
    }

    /// Set the weight for a country, replacing any previous value
    pub fn insert(&mut self, code: impl Into<String>, weight: f64) {
        self.0.insert(code.into(), weight);
    }

    /// Add to the weight for a country
    pub fn add(&mut self, code: &str, weight: f64) {
        *self.0.entry(code.to_string()).or_insert(0.0) += weight;
    }

    /// Weight of a country (0.0 when absent)
    pub fn get(&self, code: &str) -> f64 {
        self.0.get(code).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(code, weight)| (code.as_str(), *weight))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Rescale weights so they sum to 1 (no-op for empty or zero-sum input)
    pub fn normalized(mut self) -> Self {
        let total = self.total();
        if total > 0.0 && total.is_finite() {
            for weight in self.0.values_mut() {
                *weight /= total;
            }
        }
        self
    }

    /// Countries ordered by descending weight, ties broken by code
    pub fn ranked(&self) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> =
            self.0.iter().map(|(code, weight)| (code.clone(), *weight)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CountryDistribution {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(code, weight)| (code.into(), weight)).collect())
    }
}

/// Origin of an event: a producer, or the orchestrator's own `final` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSignal {
    Signal(SignalName),
    Final,
}

impl EventSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSignal::Signal(name) => name.as_str(),
            EventSignal::Final => "final",
        }
    }
}

impl fmt::Display for EventSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventSignal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventSignal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "final" {
            return Ok(EventSignal::Final);
        }
        raw.parse::<SignalName>()
            .map(EventSignal::Signal)
            .map_err(serde::de::Error::custom)
    }
}

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Result,
    Message,
    Error,
}

/// Event payload: a distribution for results, text for messages and errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Distribution(CountryDistribution),
    Text(String),
}

/// One event of an inference stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceEvent {
    pub signal: EventSignal,
    pub kind: EventKind,
    pub payload: EventPayload,
}

impl InferenceEvent {
    /// Producer reported a distribution
    pub fn signal_result(name: SignalName, distribution: CountryDistribution) -> Self {
        Self {
            signal: EventSignal::Signal(name),
            kind: EventKind::Result,
            payload: EventPayload::Distribution(distribution),
        }
    }

    /// Producer progress narration
    pub fn signal_message(name: SignalName, text: impl Into<String>) -> Self {
        Self {
            signal: EventSignal::Signal(name),
            kind: EventKind::Message,
            payload: EventPayload::Text(text.into()),
        }
    }

    /// Producer failed (informational, never fatal)
    pub fn signal_error(name: SignalName, detail: impl Into<String>) -> Self {
        Self {
            signal: EventSignal::Signal(name),
            kind: EventKind::Error,
            payload: EventPayload::Text(detail.into()),
        }
    }

    /// Orchestrator progress narration
    pub fn final_message(text: impl Into<String>) -> Self {
        Self {
            signal: EventSignal::Final,
            kind: EventKind::Message,
            payload: EventPayload::Text(text.into()),
        }
    }

    /// Combined posterior (emitted exactly once per inference)
    pub fn final_result(distribution: CountryDistribution) -> Self {
        Self {
            signal: EventSignal::Final,
            kind: EventKind::Result,
            payload: EventPayload::Distribution(distribution),
        }
    }

    /// True for the terminal `final`/`result` event
    pub fn is_final_result(&self) -> bool {
        self.signal == EventSignal::Final && self.kind == EventKind::Result
    }

    pub fn distribution(&self) -> Option<&CountryDistribution> {
        match &self.payload {
            EventPayload::Distribution(dist) => Some(dist),
            EventPayload::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text(text) => Some(text),
            EventPayload::Distribution(_) => None,
        }
    }

    /// Get event type as string for SSE event names
    pub fn event_type(&self) -> &'static str {
        match (self.signal, self.kind) {
            (EventSignal::Final, EventKind::Result) => "FinalResult",
            (EventSignal::Final, _) => "FinalMessage",
            (EventSignal::Signal(_), EventKind::Result) => "SignalResult",
            (EventSignal::Signal(_), EventKind::Message) => "SignalMessage",
            (EventSignal::Signal(_), EventKind::Error) => "SignalError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_name_parse() {
        assert_eq!("whois".parse::<SignalName>().unwrap(), SignalName::Whois);
        assert_eq!(" TLD ".parse::<SignalName>().unwrap(), SignalName::Tld);
        assert!("geoip".parse::<SignalName>().is_err());
    }

    #[test]
    fn test_signal_order_is_declaration_order() {
        let mut names = vec![SignalName::Lang, SignalName::Prior, SignalName::Whois];
        names.sort();
        assert_eq!(names, vec![SignalName::Prior, SignalName::Whois, SignalName::Lang]);
    }

    #[test]
    fn test_event_wire_format() {
        let event = InferenceEvent::signal_result(SignalName::Tld, CountryDistribution::single("de"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"signal": "tld", "kind": "result", "payload": {"de": 1.0}})
        );

        let message = InferenceEvent::final_message("awaiting results from 2 more producer(s).");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["signal"], "final");
        assert_eq!(json["kind"], "message");
        assert_eq!(json["payload"], "awaiting results from 2 more producer(s).");
    }

    #[test]
    fn test_event_deserialize() {
        let raw = r#"{"signal":"final","kind":"result","payload":{"us":0.75,"de":0.25}}"#;
        let event: InferenceEvent = serde_json::from_str(raw).unwrap();
        assert!(event.is_final_result());
        assert_eq!(event.distribution().unwrap().get("us"), 0.75);

        let raw = r#"{"signal":"whois","kind":"error","payload":"lookup failed"}"#;
        let event: InferenceEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.signal, EventSignal::Signal(SignalName::Whois));
        assert_eq!(event.text(), Some("lookup failed"));
    }

    #[test]
    fn test_distribution_ranked_and_normalized() {
        let dist: CountryDistribution =
            vec![("us", 2.0), ("gb", 1.0), ("ca", 1.0)].into_iter().collect();
        let dist = dist.normalized();
        assert!((dist.total() - 1.0).abs() < 1e-12);

        let ranked = dist.ranked();
        assert_eq!(ranked[0].0, "us");
        // ties broken by code
        assert_eq!(ranked[1].0, "ca");
        assert_eq!(ranked[2].0, "gb");
    }

    #[test]
    fn test_distribution_missing_key_is_zero() {
        let dist = CountryDistribution::single("fr");
        assert_eq!(dist.get("de"), 0.0);
        assert!(!dist.contains("de"));
        assert_eq!(CountryDistribution::new().normalized().len(), 0);
    }
}
