//! Simulation handler

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::simulation::{SimulationRequest, SimulationResponse, SimulationServiceError};
use axum::{extract::rejection::JsonRejection, extract::State, Json};

/// Run the inner-loop optimizer for one request
pub async fn run_simulation(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<Json<SimulationResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let response = state
        .simulation
        .simulate(request)
        .await
        .map_err(|err| match err {
            SimulationServiceError::Validation(message) => ApiError::Validation(message),
            SimulationServiceError::Core(core) => ApiError::from(core),
            SimulationServiceError::Timeout(secs) => ApiError::Timeout(secs),
            SimulationServiceError::Worker(message) => ApiError::Internal(message),
        })?;

    Ok(Json(response))
}
