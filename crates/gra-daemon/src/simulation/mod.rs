//! Simulation request handling around the inner-loop optimizer

pub mod request;
pub mod response;
pub mod service;

pub use request::SimulationRequest;
pub use response::{ErrorEstimate, SimulationResponse};
pub use service::{SimulationService, SimulationServiceError, SimulationStats};
