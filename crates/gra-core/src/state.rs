//! Hypothesis amplitude vector Ψ.

use serde::{Deserialize, Serialize};

use crate::error::{GraError, GraResult};

/// Amplitudes over the hypothesis nodes, one per node index.
///
/// Unit norm is established by [`StateVector::normalized`]. Nothing renormalizes
/// the vector afterwards: the barrier step adds noise in place and the norm
/// drifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector {
    amplitudes: Vec<f64>,
}

impl StateVector {
    /// Wrap amplitudes as given, without normalizing.
    pub fn from_raw(amplitudes: Vec<f64>) -> Self {
        Self { amplitudes }
    }

    /// Scale `amplitudes` to unit L2 norm.
    pub fn normalized(amplitudes: Vec<f64>) -> GraResult<Self> {
        let norm = l2_norm(&amplitudes);
        if !norm.is_finite() || norm == 0.0 {
            return Err(GraError::Configuration(format!(
                "cannot normalize state with norm {norm}"
            )));
        }
        Ok(Self {
            amplitudes: amplitudes.into_iter().map(|a| a / norm).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn norm(&self) -> f64 {
        l2_norm(&self.amplitudes)
    }

    /// |ψ_i|², or `None` when `index` is past the end of the vector.
    #[inline]
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.amplitudes.get(index).map(|a| a * a)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.amplitudes
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.amplitudes
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.amplitudes
    }
}

fn l2_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}
