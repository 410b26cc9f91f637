//! Per-call inference state
//!
//! One session per `infer` call. It is owned by the orchestrator's event loop
//! and never shared, so it needs no locking.

use crate::fusion::{PartialResults, SignalEvidence};
use chrono::{DateTime, Utc};
use geoprov_common::SignalName;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Result of recording a terminal report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First report for a registered signal
    Recorded,
    /// Signal already reported; report ignored
    Duplicate,
    /// Signal not registered with this session; report ignored
    Unregistered,
}

#[derive(Debug)]
pub struct InferenceSession {
    id: Uuid,
    url: String,
    registered: Vec<SignalName>,
    partials: PartialResults,
    completed: BTreeSet<SignalName>,
    started_at: DateTime<Utc>,
}

impl InferenceSession {
    /// # Arguments
    /// * `url` - URL under inference
    /// * `registered` - Signals expected to report (unique)
    pub fn new(url: impl Into<String>, registered: Vec<SignalName>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            registered,
            partials: PartialResults::new(),
            completed: BTreeSet::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn registered(&self) -> &[SignalName] {
        &self.registered
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record the terminal outcome of a signal (failures record empty evidence)
    pub fn record(&mut self, signal: SignalName, evidence: SignalEvidence) -> RecordOutcome {
        if !self.registered.contains(&signal) {
            return RecordOutcome::Unregistered;
        }
        if !self.completed.insert(signal) {
            return RecordOutcome::Duplicate;
        }
        self.partials.insert(signal, evidence);
        RecordOutcome::Recorded
    }

    pub fn has_reported(&self, signal: SignalName) -> bool {
        self.completed.contains(&signal)
    }

    /// Join condition: every registered signal has reported
    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.registered.len()
    }

    /// Number of signals still outstanding
    pub fn outstanding(&self) -> usize {
        self.registered.len() - self.completed.len()
    }

    /// Registered signals that have not reported, in registration order
    pub fn missing(&self) -> Vec<SignalName> {
        self.registered
            .iter()
            .copied()
            .filter(|s| !self.completed.contains(s))
            .collect()
    }

    pub fn partials(&self) -> &PartialResults {
        &self.partials
    }

    /// Milliseconds since the session started
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprov_common::CountryDistribution;

    fn session() -> InferenceSession {
        InferenceSession::new(
            "http://example.de",
            vec![SignalName::Tld, SignalName::Lang, SignalName::Prior],
        )
    }

    #[test]
    fn test_join_condition() {
        let mut session = session();
        assert!(!session.is_complete());
        assert_eq!(session.outstanding(), 3);

        session.record(SignalName::Lang, SignalEvidence::empty());
        session.record(SignalName::Tld, SignalEvidence::new(CountryDistribution::single("de")));
        assert_eq!(session.missing(), vec![SignalName::Prior]);

        session.record(SignalName::Prior, SignalEvidence::empty());
        assert!(session.is_complete());
        assert_eq!(session.outstanding(), 0);
        assert_eq!(session.partials().len(), 3);
    }

    #[test]
    fn test_duplicate_reports_ignored() {
        let mut session = session();
        let first = SignalEvidence::new(CountryDistribution::single("de"));
        let second = SignalEvidence::new(CountryDistribution::single("fr"));

        assert_eq!(session.record(SignalName::Tld, first.clone()), RecordOutcome::Recorded);
        assert_eq!(session.record(SignalName::Tld, second), RecordOutcome::Duplicate);
        assert_eq!(session.partials()[&SignalName::Tld], first);
        assert_eq!(session.outstanding(), 2);
    }

    #[test]
    fn test_unregistered_signal_ignored() {
        let mut session = session();
        assert_eq!(
            session.record(SignalName::Whois, SignalEvidence::empty()),
            RecordOutcome::Unregistered
        );
        assert!(!session.has_reported(SignalName::Whois));
        assert_eq!(session.outstanding(), 3);
    }

    #[test]
    fn test_empty_session_is_complete() {
        let session = InferenceSession::new("http://example.de", Vec::new());
        assert!(session.is_complete());
        assert!(session.missing().is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(session().id(), session().id());
    }
}
