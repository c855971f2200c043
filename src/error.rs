//! Error types.

use thiserror::Error;

/// Errors raised by tour construction and annealing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Fewer than two tour positions touch an edge longer than the
    /// current size scale.
    ///
    /// Recoverable: lower the size scale and rebuild, or switch to a
    /// selector that does not need a pool.
    #[error("candidate pool too small: {pool_size} position(s) exceed size scale {size_scale}")]
    PoolTooSmall {
        /// Number of positions that qualified.
        pool_size: usize,
        /// The size scale the pool was built against.
        size_scale: f64,
    },

    /// A configuration value was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The point set is too small to form a tour with non-trivial moves.
    #[error("too few vertices: found {found}, need at least {required}")]
    TooFewVertices {
        /// Number of vertices supplied.
        found: usize,
        /// Minimum accepted.
        required: usize,
    },

    /// The input point set cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_too_small_message() {
        let err = TspError::PoolTooSmall {
            pool_size: 1,
            size_scale: 3.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 position"), "unexpected message: {msg}");
        assert!(msg.contains('3'), "unexpected message: {msg}");
    }

    #[test]
    fn test_too_few_vertices_message() {
        let err = TspError::TooFewVertices {
            found: 2,
            required: 4,
        };
        assert_eq!(err.to_string(), "too few vertices: found 2, need at least 4");
    }
}
