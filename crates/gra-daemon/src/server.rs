//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use crate::simulation::SimulationService;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// GRA simulation server
pub struct Server {
    config: DaemonConfig,
    simulation: Arc<SimulationService>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        if config.server.request_timeout_secs == 0 {
            return Err(DaemonError::Config(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        let device = config.compute.resolve()?;
        let simulation = Arc::new(SimulationService::new(
            device,
            Duration::from_secs(config.server.request_timeout_secs),
        ));

        Ok(Self { config, simulation })
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.simulation.clone());
        let app = create_router(state, &self.config.server);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("GRA daemon listening on {}", addr);
        tracing::info!("Compute device: {}", self.simulation.device());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("GRA daemon shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComputeConfig, DevicePreference};

    #[test]
    fn test_server_rejects_zero_timeout() {
        let mut config = DaemonConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(matches!(Server::new(config), Err(DaemonError::Config(_))));
    }

    #[test]
    fn test_server_rejects_unavailable_accelerator() {
        let config = DaemonConfig {
            compute: ComputeConfig {
                device: DevicePreference::Accelerator,
            },
            ..Default::default()
        };
        assert!(Server::new(config).is_err());
    }
}
