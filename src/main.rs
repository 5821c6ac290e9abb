use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use floodgate::config::ThrottleConfig;
use floodgate::throttle::{RateLimit, Throttler};

/// Demonstration driver for the Floodgate admission gate.
#[derive(Debug, Parser)]
#[command(name = "floodgate", version)]
struct Args {
    /// Path to a YAML file describing the rate limits to enforce
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    info!("Starting Floodgate demo");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let limits = match &args.config {
        Some(path) => ThrottleConfig::from_file(path)?.build_limits()?,
        None => vec![
            RateLimit::new(2, Duration::from_secs(1))?,
            RateLimit::new(3, Duration::from_secs(2))?,
        ],
    };
    for limit in &limits {
        info!(
            max_requests = limit.max_requests(),
            window = ?limit.window(),
            "Enforcing limit"
        );
    }

    let gate = Throttler::new(
        |name: &'static str| async move {
            info!(call = name, "Running throttled action");
        },
        limits,
    );

    for name in ["call1", "call2", "call3"] {
        run_call(&gate, name).await;
    }

    info!("Sleeping 1.1s to let the shortest window slide");
    tokio::time::sleep(Duration::from_millis(1100)).await;

    for name in ["call4", "call5", "call6"] {
        run_call(&gate, name).await;
    }

    info!("Floodgate demo finished");
    Ok(())
}

async fn run_call<F, Fut>(gate: &Throttler<&'static str, F>, name: &'static str)
where
    F: Fn(&'static str) -> Fut,
    Fut: Future<Output = ()>,
{
    match gate.perform(name).await {
        Ok(()) => info!(call = name, "Admitted"),
        Err(e) => warn!(call = name, error = %e, "Rejected"),
    }
}
