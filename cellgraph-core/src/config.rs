//! Graph Configuration
//!
//! A graph carries a small configuration that is fixed at construction.
//! It can be built in code or loaded from JSON:
//!
//! ```rust
//! use cellgraph_core::config::{GraphConfig, SelfDependencyPolicy};
//!
//! let config = GraphConfig::from_json(r#"{ "self_dependency": "reject" }"#).unwrap();
//! assert_eq!(config.self_dependency, SelfDependencyPolicy::Reject);
//! assert_eq!(config.initial_capacity, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GraphResult;

/// What to do when a node is made to depend on itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfDependencyPolicy {
    /// Record `(s, s)` like any other pair and count it in the size.
    #[default]
    Allow,

    /// Fail with [`GraphError::SelfDependency`](crate::GraphError::SelfDependency).
    Reject,
}

/// Construction-time settings for a [`DependencyGraph`](crate::DependencyGraph).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Handling of self-referential pairs.
    pub self_dependency: SelfDependencyPolicy,

    /// Number of nodes to reserve room for in each direction.
    pub initial_capacity: usize,
}

impl GraphConfig {
    /// Parse a configuration from a JSON document. Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration to JSON.
    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_self_dependency(mut self, policy: SelfDependencyPolicy) -> Self {
        self.self_dependency = policy;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn default_allows_self_dependency() {
        let config = GraphConfig::default();
        assert_eq!(config.self_dependency, SelfDependencyPolicy::Allow);
        assert_eq!(config.initial_capacity, 0);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = GraphConfig::from_json("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn json_round_trip_keeps_fields() {
        let config = GraphConfig::default()
            .with_self_dependency(SelfDependencyPolicy::Reject)
            .with_initial_capacity(64);

        let json = config.to_json().unwrap();
        assert!(json.contains("\"reject\""));
        assert_eq!(GraphConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = GraphConfig::from_json(r#"{ "self_dependency": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }
}
