//! Simulation service: builds the optimizer inputs and runs the inner loop.

use gra_core::{
    effective_dimension, BarrierOptimizer, ComputeDevice, GraError, GraResult, HypothesisGraph,
    OptimizationResult, PairProviders, StateVector,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::request::SimulationRequest;
use super::response::SimulationResponse;

/// Separates the placeholder-jitter stream from the optimizer stream for seeded requests.
const PLACEHOLDER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, thiserror::Error)]
pub enum SimulationServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Core(#[from] GraError),
    #[error("simulation exceeded {0}s budget")]
    Timeout(u64),
    #[error("simulation worker failed: {0}")]
    Worker(String),
}

/// Counters reported by `/status`.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct SimulationStats {
    pub simulations_run: u64,
    pub simulations_failed: u64,
}

/// Runs one optimizer per request on a blocking worker.
pub struct SimulationService {
    device: ComputeDevice,
    budget: Duration,
    runs: AtomicU64,
    failures: AtomicU64,
}

impl SimulationService {
    pub fn new(device: ComputeDevice, budget: Duration) -> Self {
        Self {
            device,
            budget,
            runs: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub fn device(&self) -> ComputeDevice {
        self.device
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            simulations_run: self.runs.load(Ordering::Relaxed),
            simulations_failed: self.failures.load(Ordering::Relaxed),
        }
    }

    pub async fn simulate(
        &self,
        request: SimulationRequest,
    ) -> Result<SimulationResponse, SimulationServiceError> {
        request
            .validate()
            .map_err(SimulationServiceError::Validation)?;

        self.runs.fetch_add(1, Ordering::Relaxed);
        let outcome = self.run_with_budget(&request).await;
        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %err, "Simulation failed");
                return Err(err);
            }
        };

        tracing::info!(
            complexity_level = request.complexity_level,
            iterations = result.iterations(),
            phi_min = result.phi_min,
            convergence_rate = result.convergence_rate,
            "Simulation finished"
        );

        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ PLACEHOLDER_SEED_SALT),
            None => StdRng::from_entropy(),
        };
        Ok(SimulationResponse::build(&request, result, &mut rng))
    }

    async fn run_with_budget(
        &self,
        request: &SimulationRequest,
    ) -> Result<OptimizationResult, SimulationServiceError> {
        let device = self.device;
        let job = request.clone();
        let task = tokio::task::spawn_blocking(move || run_inner_loop(&job, device));

        // A timed-out worker keeps running to its step cap; only the response is dropped.
        let joined = tokio::time::timeout(self.budget, task)
            .await
            .map_err(|_| SimulationServiceError::Timeout(self.budget.as_secs()))?;
        let result = joined.map_err(|e| SimulationServiceError::Worker(e.to_string()))??;
        Ok(result)
    }
}

/// Synthesize the graph, providers and initial state for `request`, then optimize.
pub fn run_inner_loop(
    request: &SimulationRequest,
    device: ComputeDevice,
) -> GraResult<OptimizationResult> {
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = effective_dimension(request.complexity_level) as usize;
    let graph = synthesize_graph(n, &mut rng)?;
    let providers = PairProviders::sampled(n, &mut rng);
    let initial_state = random_initial_state(n, &mut rng)?;

    let mut config = request.optimizer_config();
    config.device = device;
    let optimizer = BarrierOptimizer::new(config, graph, providers)?;
    optimizer.optimize_with_rng(&initial_state, &request.goal(), &mut rng)
}

/// Complete graph over `0..n` with weights uniform in (0, 1].
pub fn synthesize_graph<R: Rng + ?Sized>(n: usize, rng: &mut R) -> GraResult<HypothesisGraph> {
    let mut graph = HypothesisGraph::with_nodes(n);
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(i, j, 1.0 - rng.gen::<f64>())?;
        }
    }
    Ok(graph)
}

/// Uniform [0, 1) amplitudes scaled to unit norm.
pub fn random_initial_state<R: Rng + ?Sized>(n: usize, rng: &mut R) -> GraResult<StateVector> {
    let amplitudes: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    StateVector::normalized(amplitudes)
}
