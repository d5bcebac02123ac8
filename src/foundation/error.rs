/// Crate-wide result alias.
pub type CapcueResult<T> = Result<T, CapcueError>;

/// Errors surfaced by the timeline engine.
#[derive(thiserror::Error, Debug)]
pub enum CapcueError {
    /// Caller-supplied configuration or input is unusable (zero fps, zero
    /// frame budget, empty page geometry). Not recoverable locally.
    #[error("validation error: {0}")]
    Validation(String),

    /// An internal invariant was violated, e.g. the allocator's rounding
    /// reconciliation failed to converge. Indicates a defect, never a
    /// degenerate input.
    #[error("internal consistency error: {0}")]
    Internal(String),

    /// Serialization/deserialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapcueError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
