//! Error types for graph operations.

/// Errors that can occur while mutating or configuring a dependency graph.
///
/// Unknown nodes are never an error: a node that has not been seen simply
/// has no dependents and no dependees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An argument that identifies a node is not a usable identifier.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the argument.
        reason: String,
    },

    /// A node was made to depend on itself while the graph rejects that.
    #[error("self dependency rejected for node {0}")]
    SelfDependency(String),

    /// The two inverse views disagree, or the pair count drifted.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GraphError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
