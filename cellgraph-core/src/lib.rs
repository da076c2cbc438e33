//! Cellgraph Core
//!
//! This crate provides the dependency bookkeeping used by the Cellgraph
//! spreadsheet engine. It records which cells depend on which and answers
//! questions about both directions of that relation.
//!
//! It deliberately knows nothing about formulas, values or evaluation
//! order. Callers:
//!
//! - add or remove a pair when a formula reference appears or goes away
//! - replace a cell's whole dependee set when its formula is rewritten
//! - ask for dependents to find what to recompute after a change
//!
//! # Architecture
//!
//! - `graph`: the [`DependencyGraph`] itself, node identifiers, query
//!   snapshots and a lock-guarded [`SharedGraph`] handle
//! - `config`: construction-time settings, loadable from JSON
//! - `error`: the [`GraphError`] taxonomy
//!
//! # Example
//!
//! ```rust
//! use cellgraph_core::DependencyGraph;
//!
//! let mut graph: DependencyGraph = DependencyGraph::new();
//!
//! // C1 = A1 + B1
//! graph.replace_dependees("C1", ["A1", "B1"]).unwrap();
//! // D1 = C1 * 2
//! graph.add_dependency("C1", "D1").unwrap();
//!
//! assert_eq!(graph.size(), 3);
//! assert_eq!(graph.dependee_count("C1"), 2);
//!
//! // C1 = A1
//! let summary = graph.replace_dependees("C1", ["A1"]).unwrap();
//! assert_eq!(summary.removed, 1);
//! assert!(!graph.has_dependents("B1"));
//! ```

pub mod config;
pub mod error;
pub mod graph;

pub use config::{GraphConfig, SelfDependencyPolicy};
pub use error::{GraphError, GraphResult};
pub use graph::{CellRef, DependencyGraph, Node, ReplaceSummary, SharedGraph, Snapshot};
