//! Error types.
//!
//! Only two things can go wrong before a search starts: the instance is
//! malformed, or the annealing parameters are out of range. Everything that
//! happens during the search itself is recovered locally (rollback, no-op
//! moves) and never surfaces as an error.

use thiserror::Error;

/// A problem instance that cannot be searched.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("expected {expected} vertex weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} vertex values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} edges, got {actual}")]
    EdgeCountMismatch { expected: usize, actual: usize },

    #[error("edge ({u}, {v}) has an endpoint outside 0..{vertex_count}")]
    EdgeOutOfRange {
        u: usize,
        v: usize,
        vertex_count: usize,
    },

    #[error("self-loop on vertex {vertex}")]
    SelfLoop { vertex: usize },

    #[error("vertex {vertex} has invalid weight {weight}")]
    InvalidWeight { vertex: usize, weight: f64 },

    #[error("vertex {vertex} has invalid value {value}")]
    InvalidValue { vertex: usize, value: f64 },

    #[error("capacity must be finite and non-negative, got {0}")]
    InvalidCapacity(f64),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An annealing parameter outside its valid range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

/// Top-level error returned when setting up a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed instance: {0}")]
    Instance(#[from] InstanceError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = InstanceError::EdgeOutOfRange {
            u: 1,
            v: 7,
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "edge (1, 7) has an endpoint outside 0..4");

        let err: Error = ConfigError::OutOfRange {
            field: "cooling_factor",
            requirement: "in (0, 1)",
            value: 1.5,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: cooling_factor must be in (0, 1), got 1.5"
        );
    }
}
