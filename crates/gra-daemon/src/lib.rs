//! GRA Daemon library
//!
//! This module provides the service around the inner-loop optimizer:
//! - REST API handlers
//! - Simulation request validation and response shaping
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod simulation;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
pub use simulation::{SimulationRequest, SimulationResponse, SimulationService};
