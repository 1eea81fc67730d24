//! Simulation request payload and boundary validation.

use gra_core::{GoalSpecification, OptimizerConfig};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Body of `POST /simulate`. Missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRequest {
    pub complexity_level: u32,
    pub inner_steps: u32,
    /// Reserved for an outer meta-loop; validated but not used.
    pub meta_frequency: u32,
    pub heisenberg_constant: f64,
    /// Not used by the inner loop.
    pub grid_resolution: u32,
    pub target_energy: f64,
    pub target_transition_probability: f64,
    pub lambda_param: f64,
    /// Makes graph synthesis, the initial state and barrier noise reproducible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            complexity_level: 1,
            inner_steps: 8,
            meta_frequency: 3,
            heisenberg_constant: 0.01,
            grid_resolution: 200,
            target_energy: 1.732,
            target_transition_probability: 0.25,
            lambda_param: 0.5,
            seed: None,
        }
    }
}

impl SimulationRequest {
    /// Reject out-of-range fields before anything reaches the optimizer.
    pub fn validate(&self) -> Result<(), String> {
        check_range("complexity_level", self.complexity_level, 1, 10)?;
        check_range("inner_steps", self.inner_steps, 1, 500)?;
        check_range("meta_frequency", self.meta_frequency, 1, 100)?;
        check_range("heisenberg_constant", self.heisenberg_constant, 0.001, 1.0)?;
        check_range("grid_resolution", self.grid_resolution, 10, 1000)?;
        check_range("target_energy", self.target_energy, 0.1, 100.0)?;
        check_range(
            "target_transition_probability",
            self.target_transition_probability,
            0.0,
            1.0,
        )?;
        check_range("lambda_param", self.lambda_param, 0.0, 1.0)?;
        Ok(())
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            heisenberg_constant: self.heisenberg_constant,
            inner_steps: self.inner_steps,
            complexity_level: self.complexity_level,
            ..Default::default()
        }
    }

    pub fn goal(&self) -> GoalSpecification {
        GoalSpecification {
            target_energy: self.target_energy,
            target_transition_probability: self.target_transition_probability,
            lambda_param: self.lambda_param,
        }
    }
}

// NaN fails both comparisons, so it is rejected too.
fn check_range<T>(field: &str, value: T, lo: T, hi: T) -> Result<(), String>
where
    T: PartialOrd + Display + Copy,
{
    if value >= lo && value <= hi {
        Ok(())
    } else {
        Err(format!("{field} must be in [{lo}, {hi}], got {value}"))
    }
}
