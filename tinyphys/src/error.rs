//! Error type for the few operations that can reject their input
//!
//! Per-tick operations never fail: bad numbers turn into NaN/Inf state.
//! Only construction and scenario loading validate.

/// Errors raised when building bodies, partitions, or scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("body mass must be finite, got {0}")]
    NonFiniteMass(f64),
    #[error("cannot split bodies into zero chunks")]
    NoChunks,
    #[error("scenario references body index {0}, which does not exist")]
    UnknownBody(usize),
    #[error("field `{field}` needs at least 2 components, got {len}")]
    BadVector { field: &'static str, len: usize },
}
