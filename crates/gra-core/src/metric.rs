//! Cognitive-foam metric Φ(Ψ, G₀).
//!
//! ```text
//! Φ = Σ_{(i,j) ∈ E, i<j} w_ij · |ψ_i|² · |ψ_j|² · [ d_ij + λ · (1 − L_ij) ]
//! ```
//!
//! `d_ij` is the embedding distance and `L_ij` the logical compatibility, both
//! read from injected [`PairProviders`].

use crate::error::{GraError, GraResult};
use crate::graph::HypothesisGraph;
use crate::providers::PairProviders;
use crate::state::StateVector;
use crate::types::GoalSpecification;

/// Evaluates Φ over the edges of a hypothesis graph.
#[derive(Debug, Clone)]
pub struct FoamMetric {
    providers: PairProviders,
}

impl FoamMetric {
    pub fn new(providers: PairProviders) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &PairProviders {
        &self.providers
    }

    /// Φ for `state`. A graph without edges yields exactly 0.
    ///
    /// Edges with an endpoint past the end of `state` are skipped.
    pub fn compute(
        &self,
        state: &StateVector,
        graph: &HypothesisGraph,
        goal: &GoalSpecification,
    ) -> GraResult<f64> {
        let lambda = goal.lambda_param;
        let mut phi = 0.0;

        for (i, j, weight) in graph.edges() {
            let (Some(p_i), Some(p_j)) = (state.probability(i), state.probability(j)) else {
                continue;
            };

            let distance = checked_score("distance", i, j, self.providers.distance.score(i, j))?;
            let compatibility = checked_score(
                "compatibility",
                i,
                j,
                self.providers.compatibility.score(i, j),
            )?;

            let term = weight * p_i * p_j * (distance + lambda * (1.0 - compatibility));
            if !term.is_finite() {
                return Err(GraError::Computation(format!(
                    "non-finite foam term {term} on edge ({i}, {j})"
                )));
            }
            phi += term;
        }

        if !phi.is_finite() {
            return Err(GraError::Computation(format!("foam value overflowed: {phi}")));
        }
        Ok(phi)
    }
}

fn checked_score(kind: &str, i: usize, j: usize, value: f64) -> GraResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(GraError::Computation(format!(
            "{kind} provider returned {value} for ({i}, {j}), expected a value in [0, 1]"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn two_node_graph() -> HypothesisGraph {
        let mut graph = HypothesisGraph::new();
        graph.add_edge(0, 1, 1.0).unwrap();
        graph
    }

    #[test]
    fn two_node_reference_value() {
        let metric = FoamMetric::new(PairProviders::constant(0.5, 0.5));
        let a = 1.0 / 2.0_f64.sqrt();
        let state = StateVector::from_raw(vec![a, a]);
        let phi = metric
            .compute(&state, &two_node_graph(), &GoalSpecification::default())
            .unwrap();
        assert!((phi - 0.1875).abs() < 1e-12, "phi = {phi}");
    }

    #[test]
    fn quarter_probabilities_scale_by_sixteenth() {
        // |ψ|² = 0.25 on both nodes: 1 · 0.25 · 0.25 · 0.75
        let metric = FoamMetric::new(PairProviders::constant(0.5, 0.5));
        let state = StateVector::from_raw(vec![0.5, 0.5]);
        let phi = metric
            .compute(&state, &two_node_graph(), &GoalSpecification::default())
            .unwrap();
        assert!((phi - 0.046875).abs() < 1e-12, "phi = {phi}");
    }

    #[test]
    fn empty_graph_is_exactly_zero() {
        let metric = FoamMetric::new(PairProviders::constant(0.9, 0.1));
        let state = StateVector::from_raw(vec![0.3, -7.0, 1e6]);
        let phi = metric
            .compute(&state, &HypothesisGraph::with_nodes(3), &GoalSpecification::default())
            .unwrap();
        assert_eq!(phi, 0.0);
    }

    #[test]
    fn lambda_weights_incompatibility() {
        let metric = FoamMetric::new(PairProviders::constant(0.0, 0.0));
        let state = StateVector::from_raw(vec![1.0, 1.0]);
        let mut goal = GoalSpecification::default();

        goal.lambda_param = 0.0;
        assert_eq!(metric.compute(&state, &two_node_graph(), &goal).unwrap(), 0.0);

        goal.lambda_param = 1.0;
        assert_eq!(metric.compute(&state, &two_node_graph(), &goal).unwrap(), 1.0);
    }

    #[test]
    fn edges_outside_state_are_skipped() {
        let metric = FoamMetric::new(PairProviders::constant(1.0, 0.0));
        let mut graph = two_node_graph();
        graph.add_edge(1, 5, 3.0).unwrap();
        let state = StateVector::from_raw(vec![1.0, 1.0]);
        let phi = metric
            .compute(&state, &graph, &GoalSpecification::default())
            .unwrap();
        assert_eq!(phi, 1.5);
    }

    #[test]
    fn nan_provider_is_a_computation_error() {
        let providers = PairProviders::new(
            Arc::new(|_: usize, _: usize| f64::NAN),
            Arc::new(|_: usize, _: usize| 0.5),
        );
        let metric = FoamMetric::new(providers);
        let state = StateVector::from_raw(vec![0.5, 0.5]);
        let err = metric
            .compute(&state, &two_node_graph(), &GoalSpecification::default())
            .unwrap_err();
        assert!(err.is_computation());
    }

    #[test]
    fn out_of_range_provider_is_rejected() {
        let metric = FoamMetric::new(PairProviders::constant(0.5, 1.5));
        let state = StateVector::from_raw(vec![0.5, 0.5]);
        assert!(metric
            .compute(&state, &two_node_graph(), &GoalSpecification::default())
            .is_err());
    }

    #[test]
    fn non_finite_amplitude_is_rejected() {
        let metric = FoamMetric::new(PairProviders::constant(0.5, 0.5));
        let state = StateVector::from_raw(vec![f64::INFINITY, 0.5]);
        assert!(metric
            .compute(&state, &two_node_graph(), &GoalSpecification::default())
            .unwrap_err()
            .is_computation());
    }
}
