//! GRA Daemon - inner-loop optimizer service
//!
//! The daemon provides:
//! - `POST /api/v1/simulate` running the Heisenberg-barrier inner loop
//! - `GET /api/v1/health` and `GET /api/v1/status`

use clap::Parser;
use gra_daemon::config::DevicePreference;
use gra_daemon::error::{DaemonError, DaemonResult};
use gra_daemon::{DaemonConfig, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// GRA Daemon CLI
#[derive(Parser)]
#[command(name = "grad")]
#[command(about = "GRA Daemon - Heisenberg-barrier inner-loop optimizer service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GRA_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, env = "GRA_LISTEN_ADDR")]
    listen: Option<String>,

    /// Compute device: auto, cpu or accelerator
    #[arg(short, long, env = "GRA_DEVICE")]
    device: Option<String>,

    /// Log level
    #[arg(long, env = "GRA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "GRA_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(device) = &cli.device {
        config.compute.device = device.parse::<DevicePreference>()?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
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

    println!(
        r#"
   ____ ____      _
  / ___|  _ \    / \
 | |  _| |_) |  / _ \
 | |_| |  _ <  / ___ \
  \____|_| \_\/_/   \_\

  GRA-Heisenberg inner-loop optimizer
  Version: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    let server = Server::new(config)?;
    server.run().await
}
