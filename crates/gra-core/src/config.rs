//! Optimizer configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GraError, GraResult};

/// Compute device the optimizer is asked to run on.
///
/// Passed in explicitly; the core never probes the host for an accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeDevice {
    #[default]
    Cpu,
    Accelerator,
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeDevice::Cpu => write!(f, "cpu"),
            ComputeDevice::Accelerator => write!(f, "accelerator"),
        }
    }
}

/// Runtime configuration for [`crate::BarrierOptimizer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Barrier noise scale ħ_G. Must be > 0.
    /// Default: 0.01.
    pub heisenberg_constant: f64,

    /// Iteration cap for one `optimize` call. Must be >= 1.
    /// Default: 8.
    pub inner_steps: u32,

    /// Drives the effective dimensionality of the solution space. Must be >= 1.
    /// Default: 1.
    pub complexity_level: u32,

    /// Device the caller selected for this optimizer.
    #[serde(default)]
    pub device: ComputeDevice,

    /// Seed for the barrier noise. `None` draws from OS entropy on every call.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            heisenberg_constant: 0.01,
            inner_steps: 8,
            complexity_level: 1,
            device: ComputeDevice::Cpu,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> GraResult<()> {
        if !self.heisenberg_constant.is_finite() || self.heisenberg_constant <= 0.0 {
            return Err(GraError::Configuration(format!(
                "heisenberg_constant must be finite and > 0, got {}",
                self.heisenberg_constant
            )));
        }
        if self.inner_steps < 1 {
            return Err(GraError::Configuration(format!(
                "inner_steps must be >= 1, got {}",
                self.inner_steps
            )));
        }
        if self.complexity_level < 1 {
            return Err(GraError::Configuration(format!(
                "complexity_level must be >= 1, got {}",
                self.complexity_level
            )));
        }
        Ok(())
    }

    /// Effective dimension D = max(1, 2 · complexity_level).
    pub fn effective_dimension(&self) -> u64 {
        crate::bound::effective_dimension(self.complexity_level)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> GraResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GraError::Configuration(format!("JSON parse error: {e}")))
    }
}
