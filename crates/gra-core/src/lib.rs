#![deny(unsafe_code)]
//! # gra-core
//!
//! Inner loop of the GRA-Heisenberg optimizer.
//!
//! - [`FoamMetric`] computes the cognitive-foam value Φ over a [`HypothesisGraph`]
//! - [`FundamentalBound`] gives the floor Φ_min = (ħ_G/2)·ln(D)
//! - [`BarrierOptimizer`] iterates, injecting Gaussian noise whenever Φ nears Φ_min
//!
//! Distances and compatibilities between hypotheses come from injected
//! [`PairScore`] providers.

pub mod bound;
pub mod config;
pub mod error;
pub mod graph;
pub mod metric;
pub mod optimizer;
pub mod providers;
pub mod state;
pub mod types;

pub use bound::{effective_dimension, FundamentalBound};
pub use config::{ComputeDevice, OptimizerConfig};
pub use error::{GraError, GraResult};
pub use graph::{HypothesisGraph, HypothesisNode};
pub use metric::FoamMetric;
pub use optimizer::BarrierOptimizer;
pub use providers::{ConstantScore, PairProviders, PairScore, PairTable};
pub use state::StateVector;
pub use types::{convergence_rate, GoalSpecification, OptimizationResult};
