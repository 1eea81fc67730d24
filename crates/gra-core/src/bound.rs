//! Fundamental bound Φ_min = (ħ_G / 2) · ln(D + ε).

use crate::error::{GraError, GraResult};

/// Stabilizer added to the dimension before taking the logarithm.
pub const DIMENSION_EPSILON: f64 = 1e-10;

/// Effective dimension of the solution space: `max(1, 2 · complexity_level)`.
#[inline]
pub fn effective_dimension(complexity_level: u32) -> u64 {
    (u64::from(complexity_level) * 2).max(1)
}

/// Theoretical floor on Φ.
pub struct FundamentalBound;

impl FundamentalBound {
    pub fn compute(effective_dimension: f64, heisenberg_constant: f64) -> GraResult<f64> {
        if !heisenberg_constant.is_finite() || heisenberg_constant <= 0.0 {
            return Err(GraError::Computation(format!(
                "heisenberg_constant must be finite and > 0, got {heisenberg_constant}"
            )));
        }
        let stabilized = effective_dimension + DIMENSION_EPSILON;
        if !stabilized.is_finite() || stabilized <= 0.0 {
            return Err(GraError::Computation(format!(
                "logarithm of non-positive effective dimension {effective_dimension}"
            )));
        }
        Ok((heisenberg_constant / 2.0) * stabilized.ln())
    }

    /// Φ_min for a complexity level, going through [`effective_dimension`].
    pub fn for_complexity(complexity_level: u32, heisenberg_constant: f64) -> GraResult<f64> {
        Self::compute(
            effective_dimension(complexity_level) as f64,
            heisenberg_constant,
        )
    }
}
