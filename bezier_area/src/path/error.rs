use thiserror::Error;

/// Errors raised when path input cannot be turned into an area.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("path command {index} has a NaN or infinite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("path command {index} draws before any move-to command")]
    MissingMoveTo { index: usize },
    #[error("unknown winding rule code {0}, expected 0 (even-odd) or 1 (nonzero)")]
    UnknownWindingRule(i32),
    #[error("transform has a NaN or infinite entry")]
    NonFiniteTransform,
}
