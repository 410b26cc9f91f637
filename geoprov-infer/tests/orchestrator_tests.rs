//! Integration tests for the ensemble orchestrator
//!
//! Join semantics, event ordering and failure handling across producers.

mod helpers;

use futures::StreamExt;
use geoprov_common::events::EventKind;
use geoprov_common::{CountryDistribution, SignalName};
use geoprov_infer::catalog::CountryCatalog;
use geoprov_infer::fusion::ModelCoefficients;
use geoprov_infer::producers::{CallbackProducer, SignalProducer, TldProducer};
use geoprov_infer::EnsembleOrchestrator;
use helpers::{
    events_of, final_messages, final_result_count, orchestrator, PanickingProducer, ScriptedProducer,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

const URL: &str = "http://example.de";

fn assert_normalized(dist: &CountryDistribution) {
    assert!((dist.total() - 1.0).abs() < 1e-9, "sum was {}", dist.total());
}

// ============================================================================
// Join semantics
// ============================================================================

#[tokio::test]
async fn test_final_result_exactly_once_for_any_producer_count() {
    for n in 0..=SignalName::ALL.len() {
        let producers = SignalName::ALL[..n]
            .iter()
            .enumerate()
            .map(|(i, &name)| ScriptedProducer::ok(name, &[("de", 1.0)]).after(5 * i as u64).arc())
            .collect();
        let outcome = orchestrator(producers).infer_collect(URL).await;

        assert_eq!(final_result_count(&outcome.events), 1, "n = {}", n);
        assert!(outcome.events.last().unwrap().is_final_result(), "n = {}", n);
        assert_normalized(&outcome.distribution);

        // every producer reported before the final result
        for &name in &SignalName::ALL[..n] {
            assert_eq!(events_of(&outcome.events, name, EventKind::Result).len(), 1);
        }

        let messages = final_messages(&outcome.events);
        assert_eq!(messages.last(), Some(&"received all producer results."));
        let awaiting = messages.iter().filter(|m| m.starts_with("awaiting")).count();
        assert_eq!(awaiting, n.saturating_sub(1), "n = {}", n);
    }
}

#[tokio::test]
async fn test_completion_order_does_not_change_result() {
    let scripts: [(SignalName, &[(&str, f64)]); 4] = [
        (SignalName::Prior, &[("us", 0.4), ("de", 0.1), ("fr", 0.1)]),
        (SignalName::Tld, &[("de", 1.0)]),
        (SignalName::Wikidata, &[("fr", 1.0)]),
        (SignalName::Lang, &[("de", 0.7), ("at", 0.2), ("ch", 0.1)]),
    ];
    let orders: [[u64; 4]; 4] = [[0, 10, 20, 30], [30, 20, 10, 0], [10, 30, 0, 20], [20, 0, 30, 10]];

    let mut results = Vec::new();
    for delays in orders {
        let producers = scripts
            .iter()
            .zip(delays)
            .map(|((name, pairs), delay)| ScriptedProducer::ok(*name, pairs).after(delay).arc())
            .collect();
        results.push(orchestrator(producers).infer(URL, None).await);
    }

    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

#[tokio::test]
async fn test_zero_producers_yields_prior_free_posterior() {
    let orch = orchestrator(Vec::new());
    let catalog = CountryCatalog::builtin();

    let outcome = orch.infer_collect(URL).await;
    assert_eq!(outcome.events.len(), 2);
    assert_eq!(outcome.distribution.len(), catalog.len());

    let expected = 1.0 / catalog.len() as f64;
    for (_, p) in outcome.distribution.iter() {
        assert!((p - expected).abs() < 1e-12);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_tld_alone_points_to_germany() {
    let orch = orchestrator(vec![
        ScriptedProducer::failing(SignalName::Prior, "no prior").arc(),
        Arc::new(TldProducer::default()) as Arc<dyn SignalProducer>,
        ScriptedProducer::failing(SignalName::Wikidata, "No wikidata coordinates found for url").arc(),
        ScriptedProducer::failing(SignalName::Ip, "dns failure").arc(),
        ScriptedProducer::failing(SignalName::Whois, "whois unavailable").arc(),
        ScriptedProducer::failing(SignalName::Lang, "No language inferred for URL.").arc(),
    ]);

    let outcome = orch.infer_collect(URL).await;
    let ranked = outcome.distribution.ranked();
    assert_eq!(ranked[0].0, "de");
    assert!(ranked[0].1 > 0.5);

    assert_eq!(events_of(&outcome.events, SignalName::Tld, EventKind::Result).len(), 1);
    for name in [SignalName::Prior, SignalName::Wikidata, SignalName::Ip, SignalName::Whois, SignalName::Lang] {
        assert_eq!(events_of(&outcome.events, name, EventKind::Error).len(), 1, "{}", name);
    }
}

#[tokio::test]
async fn test_all_producers_failing_gives_uniform_posterior() {
    let producers = SignalName::ALL
        .iter()
        .map(|&name| ScriptedProducer::failing(name, "unavailable").arc())
        .collect();
    let outcome = orchestrator(producers).infer_collect(URL).await;

    let values: Vec<f64> = outcome.distribution.iter().map(|(_, p)| p).collect();
    assert!(values.windows(2).all(|w| w[0] == w[1]));
    assert_normalized(&outcome.distribution);
    assert_eq!(final_result_count(&outcome.events), 1);
}

#[tokio::test]
async fn test_disagreeing_producers_with_equal_weights_tie() {
    let coefficients = ModelCoefficients::default()
        .with_weight("tld", 5.0)
        .with_weight("lang", 5.0);
    let orch = EnsembleOrchestrator::builder()
        .producer(ScriptedProducer::ok(SignalName::Tld, &[("de", 1.0)]).arc())
        .producer(ScriptedProducer::ok(SignalName::Lang, &[("fr", 1.0)]).after(10).arc())
        .coefficients(coefficients)
        .build()
        .unwrap();

    let posterior = orch.infer(URL, None).await;
    let de = posterior.get("de");
    let fr = posterior.get("fr");
    assert_eq!(de, fr);
    for (country, p) in posterior.iter() {
        if country != "de" && country != "fr" {
            assert!(p < de, "{} scored {} >= {}", country, p, de);
        }
    }
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_panicking_producer_is_a_failure() {
    let orch = orchestrator(vec![
        Arc::new(PanickingProducer(SignalName::Whois)) as Arc<dyn SignalProducer>,
        ScriptedProducer::ok(SignalName::Tld, &[("de", 1.0)]).arc(),
    ]);

    let outcome = orch.infer_collect(URL).await;
    let errors = events_of(&outcome.events, SignalName::Whois, EventKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text().unwrap().contains("producer panicked: boom"));
    assert_eq!(final_result_count(&outcome.events), 1);
    assert_eq!(outcome.distribution.ranked()[0].0, "de");
}

#[tokio::test]
async fn test_timeout_synthesises_failure() {
    let slow = ScriptedProducer::ok(SignalName::Wikidata, &[("fr", 1.0)]).after(5_000);
    let finished = Arc::clone(&slow.finished);
    let orch = EnsembleOrchestrator::builder()
        .producer(slow.arc())
        .producer_timeout(Some(Duration::from_millis(50)))
        .build()
        .unwrap();

    let outcome = orch.infer_collect(URL).await;
    let errors = events_of(&outcome.events, SignalName::Wikidata, EventKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text(), Some("Timed out after 50ms"));
    assert!(!finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_callback_producer_first_terminal_wins() {
    let orch = orchestrator(vec![Arc::new(CallbackProducer::new(SignalName::Lang, |_url, callbacks| {
        callbacks.on_message("detecting");
        callbacks.on_result(CountryDistribution::single("fr"));
        callbacks.on_result(CountryDistribution::single("jp"));
        callbacks.on_error("too late");
    })) as Arc<dyn SignalProducer>]);

    let outcome = orch.infer_collect(URL).await;
    let results = events_of(&outcome.events, SignalName::Lang, EventKind::Result);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].distribution(), Some(&CountryDistribution::single("fr")));
    assert!(events_of(&outcome.events, SignalName::Lang, EventKind::Error).is_empty());
    assert_eq!(events_of(&outcome.events, SignalName::Lang, EventKind::Message).len(), 1);
}

#[tokio::test]
async fn test_callback_producer_without_terminal_is_failure() {
    let orch = orchestrator(vec![
        Arc::new(CallbackProducer::new(SignalName::Ip, |_url, callbacks| {
            callbacks.on_message("resolving host");
        })) as Arc<dyn SignalProducer>,
        ScriptedProducer::ok(SignalName::Tld, &[("de", 1.0)]).arc(),
    ]);

    let outcome = orch.infer_collect(URL).await;
    let errors = events_of(&outcome.events, SignalName::Ip, EventKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].text(),
        Some("Contract violation: producer finished without reporting")
    );
    assert_eq!(final_result_count(&outcome.events), 1);
}

#[tokio::test]
async fn test_callback_producer_reporting_from_spawned_task() {
    let orch = orchestrator(vec![Arc::new(CallbackProducer::new(SignalName::Wikidata, |url, callbacks| {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            callbacks.on_message(format!("geocoding {}", url));
            callbacks.on_result(CountryDistribution::single("de"));
        });
    })) as Arc<dyn SignalProducer>]);

    let outcome = orch.infer_collect(URL).await;
    let messages = events_of(&outcome.events, SignalName::Wikidata, EventKind::Message);
    assert_eq!(messages[0].text(), Some("geocoding http://example.de"));
    assert_eq!(events_of(&outcome.events, SignalName::Wikidata, EventKind::Result).len(), 1);
}

// ============================================================================
// Streaming
// ============================================================================

#[tokio::test]
async fn test_stream_matches_collected_events() {
    let orch = Arc::new(orchestrator(vec![
        ScriptedProducer::ok(SignalName::Tld, &[("de", 1.0)]).arc(),
        ScriptedProducer::failing(SignalName::Whois, "whois unavailable").after(10).arc(),
    ]));

    let streamed: Vec<_> = orch.infer_stream(URL).collect().await;
    let collected = orch.infer_collect(URL).await;
    // arrival order of concurrent producers may differ between runs
    assert_eq!(streamed.len(), collected.events.len());
    assert_eq!(streamed.last(), collected.events.last());
    assert_eq!(final_result_count(&streamed), 1);
}

#[tokio::test]
async fn test_dropping_stream_cancels_producers() {
    let slow = ScriptedProducer::ok(SignalName::Lang, &[("de", 1.0)]).after(200);
    let finished = Arc::clone(&slow.finished);
    let orch = Arc::new(orchestrator(vec![slow.arc()]));

    let mut stream = Box::pin(orch.infer_stream(URL));
    let first = stream.next().await.unwrap();
    assert_eq!(first.kind, EventKind::Message);
    drop(stream);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!finished.load(Ordering::SeqCst));
}
