use serde::{Deserialize, Serialize};

use crate::error::{GraError, GraResult};
use crate::state::StateVector;

/// Target the inner loop is steering toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSpecification {
    pub target_energy: f64,
    pub target_transition_probability: f64,
    /// Trade-off between embedding distance and logical incompatibility, in [0, 1].
    #[serde(default = "default_lambda", alias = "lambda")]
    pub lambda_param: f64,
}

fn default_lambda() -> f64 {
    0.5
}

impl Default for GoalSpecification {
    fn default() -> Self {
        Self {
            target_energy: 1.732,
            target_transition_probability: 0.25,
            lambda_param: default_lambda(),
        }
    }
}

impl GoalSpecification {
    pub fn validate(&self) -> GraResult<()> {
        if !(0.0..=1.0).contains(&self.lambda_param) {
            return Err(GraError::Configuration(format!(
                "lambda_param must be in [0, 1], got {}",
                self.lambda_param
            )));
        }
        if !self.target_energy.is_finite() || !self.target_transition_probability.is_finite() {
            return Err(GraError::Configuration(
                "goal targets must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one `optimize` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub final_state: StateVector,
    /// Φ after each completed iteration, in order.
    pub phi_history: Vec<f64>,
    pub phi_min: f64,
    pub convergence_rate: f64,
    /// The tolerance check stopped the loop, possibly on its last allowed step.
    #[serde(default)]
    pub converged: bool,
}

impl OptimizationResult {
    pub fn iterations(&self) -> usize {
        self.phi_history.len()
    }

    /// Last Φ, if any iteration completed.
    pub fn final_phi(&self) -> Option<f64> {
        self.phi_history.last().copied()
    }
}

/// Signed slope `(Φ_last − Φ_first) / len`; 0 for fewer than two entries.
pub fn convergence_rate(history: &[f64]) -> f64 {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if history.len() >= 2 => (last - first) / history.len() as f64,
        _ => 0.0,
    }
}
