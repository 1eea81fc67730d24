//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::config::ACCELERATOR_AVAILABLE;
use crate::simulation::SimulationStats;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub accelerator_available: bool,
    pub device: String,
    pub version: String,
    pub uptime: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        accelerator_available: ACCELERATOR_AVAILABLE,
        device: state.simulation.device().to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize)]
pub struct DaemonStatusResponse {
    pub status: String,
    pub accelerator_available: bool,
    pub device: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub stats: SimulationStats,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> Json<DaemonStatusResponse> {
    Json(DaemonStatusResponse {
        status: "ok".to_string(),
        accelerator_available: ACCELERATOR_AVAILABLE,
        device: state.simulation.device().to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        stats: state.simulation.stats(),
    })
}
