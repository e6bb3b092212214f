//! Error taxonomy shared by all matchers.

use thiserror::Error;

use crate::node::Node;

/// Errors surfaced by the matchers.
///
/// All variants are detected synchronously and reported immediately; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchingError {
    /// The approximation parameter is not a real number strictly between `0` and `1`.
    #[error("approximation parameter must lie strictly between 0 and 1, got {eps}")]
    InvalidArgument {
        /// Rejected value
        eps: f64,
    },

    /// An augmenting path parameter `i` outside `1..`.
    #[error("augmenting path parameter must be at least 1, got {i}")]
    InvalidPathParameter {
        /// Rejected value
        i: usize,
    },

    /// The stream violates a structural precondition (e.g. it is not bipartite).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The number of rounds derived from `eps` does not fit into a `u64`.
    #[error("derived round count overflows for k = {k}; choose a larger eps")]
    ParameterOverflow {
        /// Maximum augmenting path parameter derived from `eps`
        k: u64,
    },

    /// A produced edge set is not a matching. This is always an implementation bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl MatchingError {
    /// Shorthand for a violated matching invariant at `node`
    pub(crate) fn covered_twice(node: Node, step: &str) -> Self {
        let err = MatchingError::InvariantViolation(format!(
            "vertex {node} is covered twice after {step}"
        ));
        log::error!("{err}");
        err
    }
}

/// Result type of all fallible matcher operations
pub type Result<T> = std::result::Result<T, MatchingError>;

/// Returns an error unless `0 < eps < 1`. `NaN` is rejected as well.
pub fn validate_eps(eps: f64) -> Result<f64> {
    if eps > 0.0 && eps < 1.0 {
        Ok(eps)
    } else {
        Err(MatchingError::InvalidArgument { eps })
    }
}
