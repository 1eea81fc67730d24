//! Simulation response: core outputs plus descriptive placeholder fields.

use gra_core::OptimizationResult;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::request::SimulationRequest;

const ALPHA_CENTER: f64 = -0.0083;
const BETA_CENTER: f64 = 0.0127;
const PARAMETER_JITTER: f64 = 0.0002;
const PARAMETER_UNCERTAINTY: f64 = 0.0001;

/// Discretization error at one grid size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEstimate {
    pub grid_size: u32,
    pub error: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    // Placeholders; none of these come from the optimizer.
    pub alpha: f64,
    pub beta: f64,
    pub alpha_uncertainty: f64,
    pub beta_uncertainty: f64,
    pub achieved_energy: f64,
    pub achieved_transition_probability: f64,

    // Optimizer outputs
    pub phi_value: f64,
    pub phi_min: f64,
    pub convergence_rate: f64,
    pub phi_history: Vec<f64>,
    pub iterations: usize,
    /// Set when the tolerance check stopped the loop, including on the final step.
    pub converged: bool,

    pub computational_complexity: String,
    pub estimated_runtime: f64,
    pub error_analysis: Vec<ErrorEstimate>,
    pub surviving_hypotheses: Vec<String>,
    pub falsifiable_predictions: Vec<String>,
}

impl SimulationResponse {
    pub fn build<R: Rng + ?Sized>(
        request: &SimulationRequest,
        result: OptimizationResult,
        rng: &mut R,
    ) -> Self {
        let iterations = result.iterations();
        let phi_value = result.final_phi().unwrap_or(0.0);

        Self {
            alpha: jitter(ALPHA_CENTER, rng),
            beta: jitter(BETA_CENTER, rng),
            alpha_uncertainty: PARAMETER_UNCERTAINTY,
            beta_uncertainty: PARAMETER_UNCERTAINTY,
            achieved_energy: 1.7320,
            achieved_transition_probability: 0.2505,
            phi_value,
            phi_min: result.phi_min,
            convergence_rate: result.convergence_rate,
            converged: result.converged,
            iterations,
            phi_history: result.phi_history,
            computational_complexity: complexity_label(request.complexity_level),
            estimated_runtime: 8.5,
            error_analysis: vec![
                ErrorEstimate {
                    grid_size: 200,
                    error: 0.0012,
                },
                ErrorEstimate {
                    grid_size: 300,
                    error: 0.0004,
                },
                ErrorEstimate {
                    grid_size: 400,
                    error: 0.00015,
                },
            ],
            surviving_hypotheses: vec![
                "Anisotropy: the fitted α and β indicate the anharmonic potential is anisotropic"
                    .to_string(),
                "Local versus global equilibrium: the optimal parameters may describe a local minimum"
                    .to_string(),
            ],
            falsifiable_predictions: vec![
                "Increasing α while decreasing β should lower the transition probability"
                    .to_string(),
                "Lowering ħ_G to 0.001 should reach an accuracy of 1e-5".to_string(),
            ],
        }
    }
}

fn jitter<R: Rng + ?Sized>(center: f64, rng: &mut R) -> f64 {
    match Normal::new(center, PARAMETER_JITTER) {
        Ok(normal) => normal.sample(rng),
        Err(_) => center,
    }
}

/// `O(log(Φ/Φ_min)·D²) ≈ O(ln(10)·c²)` with one decimal.
fn complexity_label(complexity_level: u32) -> String {
    let estimate = std::f64::consts::LN_10 * f64::from(complexity_level).powi(2);
    format!("O(log(Φ/Φ_min)·D²) ≈ O({estimate:.1})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gra_core::StateVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result(history: Vec<f64>, converged: bool) -> OptimizationResult {
        OptimizationResult {
            final_state: StateVector::from_raw(vec![1.0]),
            convergence_rate: gra_core::convergence_rate(&history),
            phi_history: history,
            phi_min: 0.0035,
            converged,
        }
    }

    #[test]
    fn complexity_label_format() {
        assert_eq!(complexity_label(1), "O(log(Φ/Φ_min)·D²) ≈ O(2.3)");
        assert_eq!(complexity_label(10), "O(log(Φ/Φ_min)·D²) ≈ O(230.3)");
    }

    #[test]
    fn core_fields_come_from_result() {
        let request = SimulationRequest::default();
        let mut rng = StdRng::seed_from_u64(1);
        let response = SimulationResponse::build(&request, result(vec![0.1, 0.05], true), &mut rng);
        assert_eq!(response.phi_value, 0.05);
        assert_eq!(response.phi_min, 0.0035);
        assert_eq!(response.convergence_rate, -0.025);
        assert_eq!(response.iterations, 2);
        assert!(response.converged);
        assert!((response.alpha - ALPHA_CENTER).abs() < 0.01);
    }

    #[test]
    fn empty_history_defaults_phi() {
        let request = SimulationRequest::default();
        let mut rng = StdRng::seed_from_u64(1);
        let response = SimulationResponse::build(&request, result(vec![], false), &mut rng);
        assert_eq!(response.phi_value, 0.0);
        assert_eq!(response.convergence_rate, 0.0);
    }

    #[test]
    fn exhausted_run_is_not_converged() {
        let request = SimulationRequest {
            inner_steps: 3,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let response = SimulationResponse::build(&request, result(vec![0.0; 3], false), &mut rng);
        assert!(!response.converged);
    }

    #[test]
    fn convergence_on_final_step_is_reported() {
        let request = SimulationRequest {
            inner_steps: 4,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let response =
            SimulationResponse::build(&request, result(vec![0.0035; 4], true), &mut rng);
        assert_eq!(response.iterations, 4);
        assert!(response.converged);
    }
}
