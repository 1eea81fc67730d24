//! Weighted hypothesis graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GraError, GraResult};

/// Metadata attached to a hypothesis node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HypothesisNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Undirected graph of hypotheses with positive edge weights.
///
/// Edges are kept as a sparse list keyed by `(min, max)` so the metric visits
/// each existing pair once, in ascending order, without scanning absent pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypothesisGraph {
    nodes: BTreeMap<usize, HypothesisNode>,
    edges: BTreeMap<(usize, usize), f64>,
}

impl HypothesisGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with nodes `0..n` and no edges.
    pub fn with_nodes(n: usize) -> Self {
        let mut graph = Self::new();
        for index in 0..n {
            graph.add_node(index);
        }
        graph
    }

    pub fn add_node(&mut self, index: usize) {
        self.nodes.entry(index).or_default();
    }

    pub fn add_labeled_node(&mut self, index: usize, label: impl Into<String>) {
        self.nodes.insert(
            index,
            HypothesisNode {
                label: Some(label.into()),
            },
        );
    }

    /// Insert or replace the edge `{i, j}`. Missing endpoints are added as nodes.
    pub fn add_edge(&mut self, i: usize, j: usize, weight: f64) -> GraResult<()> {
        if i == j {
            return Err(GraError::Configuration(format!(
                "self-loop on hypothesis {i} is not allowed"
            )));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GraError::Configuration(format!(
                "edge ({i}, {j}) weight must be finite and > 0, got {weight}"
            )));
        }
        self.add_node(i);
        self.add_node(j);
        self.edges.insert(edge_key(i, j), weight);
        Ok(())
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.edges.contains_key(&edge_key(i, j))
    }

    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        self.edges.get(&edge_key(i, j)).copied()
    }

    pub fn node(&self, index: usize) -> Option<&HypothesisNode> {
        self.nodes.get(&index)
    }

    /// Edges as `(i, j, weight)` with `i < j`, in ascending pair order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().map(|(&(i, j), &w)| (i, j, w))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[inline]
fn edge_key(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}
