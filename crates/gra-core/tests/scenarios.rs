//! End-to-end scenarios for the inner loop.

use std::sync::Arc;

use gra_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn two_node_setup() -> (HypothesisGraph, PairProviders, StateVector) {
    let mut graph = HypothesisGraph::new();
    graph.add_edge(0, 1, 1.0).unwrap();
    let mut distance = PairTable::new();
    distance.set(0, 1, 0.5).unwrap();
    let mut compatibility = PairTable::new();
    compatibility.set(0, 1, 0.5).unwrap();
    let providers = PairProviders::new(Arc::new(distance), Arc::new(compatibility));
    let state = StateVector::normalized(vec![1.0, 1.0]).unwrap();
    (graph, providers, state)
}

#[test]
fn two_node_foam_value() {
    let (graph, providers, state) = two_node_setup();
    let phi = FoamMetric::new(providers)
        .compute(&state, &graph, &GoalSpecification::default())
        .unwrap();
    assert!((phi - 0.1875).abs() < 1e-12);
}

#[test]
fn single_step_returns_one_entry_and_zero_rate() {
    let (graph, providers, state) = two_node_setup();
    let optimizer = BarrierOptimizer::new(
        OptimizerConfig {
            inner_steps: 1,
            ..Default::default()
        },
        graph,
        providers,
    )
    .unwrap();
    let result = optimizer
        .optimize(&state, &GoalSpecification::default())
        .unwrap();
    assert_eq!(result.phi_history.len(), 1);
    assert!((result.phi_history[0] - 0.1875).abs() < 1e-12);
    assert_eq!(result.convergence_rate, 0.0);
}

#[test]
fn complexity_one_bound() {
    let phi_min = FundamentalBound::for_complexity(1, 0.01).unwrap();
    assert!((phi_min - 0.0034657).abs() < 1e-7);
}

#[test]
fn zero_inner_steps_is_a_configuration_error() {
    let (graph, providers, _) = two_node_setup();
    let err = BarrierOptimizer::new(
        OptimizerConfig {
            inner_steps: 0,
            ..Default::default()
        },
        graph,
        providers,
    )
    .unwrap_err();
    assert!(matches!(err, GraError::Configuration(_)));
}

#[test]
fn caller_state_is_not_mutated() {
    let optimizer = BarrierOptimizer::new(
        OptimizerConfig {
            inner_steps: 12,
            seed: Some(3),
            ..Default::default()
        },
        HypothesisGraph::with_nodes(4),
        PairProviders::constant(0.2, 0.8),
    )
    .unwrap();
    let state = StateVector::normalized(vec![0.1, 0.2, 0.3, 0.4]).unwrap();
    let snapshot = state.clone();
    let result = optimizer
        .optimize(&state, &GoalSpecification::default())
        .unwrap();
    assert_eq!(state, snapshot);
    assert_ne!(result.final_state, snapshot);
}

#[test]
fn sampled_providers_on_complete_graph() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 6;
    let mut graph = HypothesisGraph::with_nodes(n);
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(i, j, 0.5).unwrap();
        }
    }
    let providers = PairProviders::sampled(n, &mut rng);
    let optimizer = BarrierOptimizer::new(
        OptimizerConfig {
            complexity_level: 3,
            inner_steps: 40,
            ..Default::default()
        },
        graph,
        providers,
    )
    .unwrap();
    let state = StateVector::normalized(vec![1.0; n]).unwrap();
    let result = optimizer
        .optimize_with_rng(&state, &GoalSpecification::default(), &mut rng)
        .unwrap();

    assert!(!result.phi_history.is_empty());
    assert!(result.phi_history.len() <= 40);
    assert!(result.phi_history.iter().all(|phi| phi.is_finite() && *phi >= 0.0));
    let expected = (result.phi_history[result.phi_history.len() - 1] - result.phi_history[0])
        / result.phi_history.len() as f64;
    if result.phi_history.len() >= 2 {
        assert_eq!(result.convergence_rate, expected);
    }
}

#[test]
fn shared_optimizer_across_threads() {
    let optimizer = Arc::new(
        BarrierOptimizer::new(
            OptimizerConfig {
                inner_steps: 16,
                ..Default::default()
            },
            HypothesisGraph::with_nodes(2),
            PairProviders::constant(0.5, 0.5),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let optimizer = Arc::clone(&optimizer);
            std::thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                let state = StateVector::normalized(vec![1.0, 1.0]).unwrap();
                optimizer
                    .optimize_with_rng(&state, &GoalSpecification::default(), &mut rng)
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.iterations(), 16);
    }
}
