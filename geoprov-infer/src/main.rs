//! geoprov - URL country-of-origin inference
//!
//! Two entry points over the same ensemble:
//! - `geoprov infer <URL>` runs one inference and prints every event as a JSON
//!   line, followed by the most probable countries
//! - `geoprov serve` exposes the HTTP/SSE API

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use geoprov_common::config::{load_config, TomlConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoprov_infer::config::build_orchestrator;
use geoprov_infer::fusion::top_countries;
use geoprov_infer::utils::validate_target;
use geoprov_infer::AppState;

/// Command-line arguments for geoprov
#[derive(Parser, Debug)]
#[command(name = "geoprov")]
#[command(about = "Infer the country of origin of a URL")]
#[command(version)]
struct Args {
    /// Configuration file (overrides GEOPROV_CONFIG and the platform default)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one inference and print its events
    Infer {
        /// URL to locate (scheme optional)
        url: String,

        /// Number of countries to list after the events
        #[arg(short, long, default_value = "5")]
        top: usize,
    },
    /// Serve the HTTP/SSE API
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(short, long, env = "GEOPROV_BIND")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config);

    match args.command {
        Command::Infer { url, top } => run_infer(&config, &url, top).await,
        Command::Serve { bind } => run_serve(config, bind).await,
    }
}

/// `RUST_LOG` wins over `logging.level`
fn init_tracing(config: &TomlConfig) {
    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("geoprov_infer={0},geoprov_common={0},tower_http=info", level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run_infer(config: &TomlConfig, url: &str, top: usize) -> Result<()> {
    let url = validate_target(url)?;
    let orchestrator = Arc::new(build_orchestrator(config).context("Failed to build orchestrator")?);

    let mut events = Box::pin(orchestrator.infer_stream(url));
    let mut posterior = None;
    while let Some(event) = events.next().await {
        println!("{}", serde_json::to_string(&event)?);
        if event.is_final_result() {
            posterior = event.distribution().cloned();
        }
    }

    let posterior = posterior.context("Inference ended without a final result")?;
    println!();
    for (rank, (country, probability)) in top_countries(&posterior, top).into_iter().enumerate() {
        println!("{:>2}. {}  {:.4}", rank + 1, country, probability);
    }
    Ok(())
}

async fn run_serve(config: TomlConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    info!("Starting geoprov service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let orchestrator = Arc::new(build_orchestrator(&config).context("Failed to build orchestrator")?);
    let app = geoprov_infer::build_router(AppState::new(orchestrator));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("Listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
