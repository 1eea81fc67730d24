/// Errors raised by the inner-loop optimizer.
#[derive(Debug, thiserror::Error)]
pub enum GraError {
    /// Invalid configuration, graph or goal values. Raised before any iteration runs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A non-finite or out-of-domain value appeared during metric or bound evaluation.
    #[error("computation error: {0}")]
    Computation(String),
}

impl GraError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, GraError::Configuration(_))
    }

    pub fn is_computation(&self) -> bool {
        matches!(self, GraError::Computation(_))
    }
}

pub type GraResult<T> = Result<T, GraError>;
