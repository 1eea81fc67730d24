//! Inner loop: barrier step, measure, convergence check.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, trace};

use crate::bound::FundamentalBound;
use crate::config::OptimizerConfig;
use crate::error::{GraError, GraResult};
use crate::graph::HypothesisGraph;
use crate::metric::FoamMetric;
use crate::providers::PairProviders;
use crate::state::StateVector;
use crate::types::{convergence_rate, GoalSpecification, OptimizationResult};

/// The barrier fires when Φ drops below this multiple of Φ_min.
pub const BARRIER_ACTIVATION_RATIO: f64 = 1.2;

/// Scale of the barrier strength `k · (1 − Φ/Φ_min)²`.
pub const BARRIER_GAIN: f64 = 10.0;

/// Converged once |Φ − Φ_min| falls under this fraction of Φ_min.
pub const CONVERGENCE_TOLERANCE: f64 = 0.1;

/// Iterations that must complete before the convergence check may stop the loop.
pub const WARMUP_STEPS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Converged,
    Exhausted,
}

/// Minimizes Φ over a fixed graph while keeping the state off the fundamental bound.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls; each call works on its own copy of the state.
#[derive(Debug, Clone)]
pub struct BarrierOptimizer {
    config: OptimizerConfig,
    graph: HypothesisGraph,
    metric: FoamMetric,
    phi_min: f64,
    noise: Normal<f64>,
}

impl BarrierOptimizer {
    /// Validates `config` and precomputes Φ_min. Fails before any iteration can run.
    pub fn new(
        config: OptimizerConfig,
        graph: HypothesisGraph,
        providers: PairProviders,
    ) -> GraResult<Self> {
        config.validate()?;

        let dimension = config.effective_dimension();
        let phi_min = FundamentalBound::compute(dimension as f64, config.heisenberg_constant)
            .map_err(|e| GraError::Configuration(e.to_string()))?;
        if phi_min <= 0.0 {
            return Err(GraError::Configuration(format!(
                "effective dimension {dimension} collapses the fundamental bound to {phi_min}"
            )));
        }

        let noise = Normal::new(0.0, (config.heisenberg_constant / 2.0).sqrt())
            .map_err(|e| GraError::Configuration(format!("barrier noise: {e}")))?;

        debug!(
            device = %config.device,
            inner_steps = config.inner_steps,
            dimension,
            phi_min,
            edges = graph.edge_count(),
            "barrier optimizer ready"
        );

        Ok(Self {
            config,
            graph,
            metric: FoamMetric::new(providers),
            phi_min,
            noise,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn graph(&self) -> &HypothesisGraph {
        &self.graph
    }

    pub fn metric(&self) -> &FoamMetric {
        &self.metric
    }

    pub fn phi_min(&self) -> f64 {
        self.phi_min
    }

    /// Run the inner loop with noise seeded from `config.seed`, or OS entropy.
    pub fn optimize(
        &self,
        initial_state: &StateVector,
        goal: &GoalSpecification,
    ) -> GraResult<OptimizationResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.optimize_with_rng(initial_state, goal, &mut rng)
    }

    /// Run the inner loop drawing barrier noise from `rng`.
    pub fn optimize_with_rng<R: Rng + ?Sized>(
        &self,
        initial_state: &StateVector,
        goal: &GoalSpecification,
        rng: &mut R,
    ) -> GraResult<OptimizationResult> {
        goal.validate()?;

        let _span = tracing::debug_span!("inner_loop", steps = self.config.inner_steps).entered();

        let mut state = initial_state.clone();
        let mut history = Vec::with_capacity(self.config.inner_steps as usize);
        let mut phase = Phase::Running;
        let mut barrier_hits = 0u32;

        for step in 0..self.config.inner_steps {
            if self.apply_barrier(&mut state, goal, rng)? {
                barrier_hits += 1;
            }

            let phi = self.metric.compute(&state, &self.graph, goal)?;
            history.push(phi);
            trace!(step, phi, phi_min = self.phi_min, "inner step");

            if step >= WARMUP_STEPS
                && (phi - self.phi_min).abs() < CONVERGENCE_TOLERANCE * self.phi_min
            {
                phase = Phase::Converged;
                break;
            }
        }

        if phase == Phase::Running {
            phase = Phase::Exhausted;
        }

        let rate = convergence_rate(&history);
        debug!(
            ?phase,
            iterations = history.len(),
            barrier_hits,
            convergence_rate = rate,
            "inner loop finished"
        );

        Ok(OptimizationResult {
            final_state: state,
            phi_history: history,
            phi_min: self.phi_min,
            convergence_rate: rate,
            converged: phase == Phase::Converged,
        })
    }

    /// Perturb `state` when Φ is within the activation band of Φ_min.
    ///
    /// Returns whether noise was injected. The state is not renormalized.
    fn apply_barrier<R: Rng + ?Sized>(
        &self,
        state: &mut StateVector,
        goal: &GoalSpecification,
        rng: &mut R,
    ) -> GraResult<bool> {
        let phi = self.metric.compute(state, &self.graph, goal)?;
        if phi >= BARRIER_ACTIVATION_RATIO * self.phi_min {
            return Ok(false);
        }

        let strength = barrier_strength(phi, self.phi_min)?;
        for amplitude in state.as_mut_slice() {
            *amplitude += strength * self.noise.sample(rng);
        }
        trace!(phi, strength, "heisenberg barrier applied");
        Ok(true)
    }
}

/// `BARRIER_GAIN · (1 − Φ/Φ_min)²`.
pub fn barrier_strength(phi: f64, phi_min: f64) -> GraResult<f64> {
    if phi_min == 0.0 {
        return Err(GraError::Computation(
            "fundamental bound is zero; barrier ratio undefined".to_string(),
        ));
    }
    let strength = BARRIER_GAIN * (1.0 - phi / phi_min).powi(2);
    if !strength.is_finite() {
        return Err(GraError::Computation(format!(
            "barrier strength is not finite for phi={phi}, phi_min={phi_min}"
        )));
    }
    Ok(strength)
}
