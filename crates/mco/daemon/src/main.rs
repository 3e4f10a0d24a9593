//! MCO mock API daemon
//!
//! Simulates the MCO (Médecine, Chirurgie, Obstétrique) activity statistics
//! backend so analytics clients can be developed and tested without a
//! connection to the real PMSI database:
//! - eight GET endpoints returning synthetic JSON rows
//! - ventilation of the results along the `var` dimensions
//! - empty-perimeter and statistical-secrecy simulations

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mco_daemon::config::DaemonConfig;
use mco_daemon::error::{DaemonError, DaemonResult};
use mco_daemon::server::Server;

/// MCO mock API CLI
#[derive(Parser)]
#[command(name = "mcod")]
#[command(about = "Mock MCO activity statistics API", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MCO_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(
        short,
        long,
        env = "MCO_LISTEN_ADDR",
        default_value = "127.0.0.1:8000"
    )]
    listen: String,

    /// Generator seed (fixed value = identical responses on every request)
    #[arg(short, long, env = "MCO_SEED")]
    seed: Option<u64>,

    /// Log level
    #[arg(long, env = "MCO_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "MCO_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    config.server.listen_addr = cli
        .listen
        .parse()
        .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;

    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    // Print startup banner
    println!(
        r#"
  __  __  ____ ___
 |  \/  |/ ___/ _ \
 | |\/| | |  | | | |
 | |  | | |__| |_| |
 |_|  |_|\____\___/

  Mock MCO Activity API
  Version: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    // Create and run server
    Server::new(config).run().await
}
