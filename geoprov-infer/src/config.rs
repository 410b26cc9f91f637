//! Orchestrator assembly from configuration
//!
//! Turns a resolved [`TomlConfig`] into a ready [`EnsembleOrchestrator`]:
//! every producer not listed in `producers.disabled` is registered, in the
//! canonical signal order.

use crate::catalog::CountryCatalog;
use crate::fusion::ModelCoefficients;
use crate::producers::{
    CoordinateTable, IpProducer, LanguageCountryTable, PageLangProducer, PriorProducer,
    SignalProducer, TcpWhoisTransport, TldProducer, WhoisProducer, WikidataProducer,
};
use crate::workflow::EnsembleOrchestrator;
use geoprov_common::config::TomlConfig;
use geoprov_common::{Error, Result, SignalName};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build the orchestrator described by `config`
///
/// # Errors
/// Invalid configuration, an unreadable coordinate table, or an HTTP client
/// that cannot be constructed.
pub fn build_orchestrator(config: &TomlConfig) -> Result<EnsembleOrchestrator> {
    config.validate()?;
    let producers = &config.producers;
    let catalog = CountryCatalog::shared();

    let disabled = disabled_signals(config)?;

    let mut builder = EnsembleOrchestrator::builder()
        .catalog(Arc::clone(&catalog))
        .producer_timeout(producers.timeout_secs.map(Duration::from_secs));

    if let Some(model) = &config.model {
        info!("Using logistic model from configuration");
        builder = builder.coefficients(ModelCoefficients::from(model));
    }

    for signal in SignalName::ALL {
        if disabled.contains(&signal) {
            info!(signal = %signal, "Producer disabled by configuration");
            continue;
        }
        let producer = build_producer(signal, config, &catalog)?;
        builder = builder.producer(producer);
    }

    let orchestrator = builder.build()?;
    info!(
        producers = ?orchestrator.producer_names(),
        timeout = ?orchestrator.producer_timeout(),
        "Orchestrator ready"
    );
    Ok(orchestrator)
}

fn disabled_signals(config: &TomlConfig) -> Result<HashSet<SignalName>> {
    config
        .producers
        .disabled
        .iter()
        .map(|name| {
            name.parse::<SignalName>()
                .map_err(|_| Error::Config(format!("Unknown signal '{}' in producers.disabled", name)))
        })
        .collect()
}

fn build_producer(
    signal: SignalName,
    config: &TomlConfig,
    catalog: &Arc<CountryCatalog>,
) -> Result<Arc<dyn SignalProducer>> {
    let producers = &config.producers;
    let user_agent = producers.user_agent.as_str();
    let client_error =
        |e: crate::producers::ProducerError| Error::Config(format!("{} producer: {}", signal, e));

    let producer: Arc<dyn SignalProducer> = match signal {
        SignalName::Prior => Arc::new(PriorProducer::new(Arc::clone(catalog))),
        SignalName::Tld => Arc::new(TldProducer::new(Arc::clone(catalog))),
        SignalName::Wikidata => {
            let coords = match &producers.wikidata_coords_path {
                Some(path) => CoordinateTable::load(path)?,
                None => {
                    warn!("No wikidata coordinate table configured; wikidata signal will be empty");
                    CoordinateTable::new()
                }
            };
            Arc::new(
                WikidataProducer::new(Arc::new(coords), producers.nominatim_url.as_str(), user_agent)
                    .map_err(client_error)?,
            )
        }
        SignalName::Ip => Arc::new(
            IpProducer::new(producers.ip_geolocation_url.as_str(), user_agent).map_err(client_error)?,
        ),
        SignalName::Whois => Arc::new(WhoisProducer::new(
            Arc::new(TcpWhoisTransport::default()),
            producers.whois_server.as_str(),
            Arc::clone(catalog),
        )),
        SignalName::Lang => Arc::new(
            PageLangProducer::new(LanguageCountryTable::shared(), user_agent).map_err(client_error)?,
        ),
    };
    Ok(producer)
}
