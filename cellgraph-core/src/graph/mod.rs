//! Dependency Graph
//!
//! This module implements the bookkeeping structure that tracks which cells
//! depend on which.
//!
//! # Overview
//!
//! The relation is a set of ordered pairs `(s, t)`, read "`t` depends on
//! `s`". In spreadsheet terms, if `B1` holds `=A1 + 1` the graph records
//! `(A1, B1)`: `B1` is a dependent of `A1` and `A1` is a dependee of `B1`.
//!
//! The graph answers two questions in constant time per node:
//!
//! - which nodes must be looked at when `s` changes (its dependents)
//! - which nodes `t` reads from (its dependees)
//!
//! # Design Decisions
//!
//! 1. Both directions are stored explicitly, as maps from node to set of
//!    nodes. Every mutation updates both before returning.
//!
//! 2. Unknown nodes are not errors. A node that never appeared and a node
//!    whose pairs were all removed look the same.
//!
//! 3. Enumeration returns owned [`Snapshot`]s, so callers can keep mutating
//!    the graph while walking a previous result.
//!
//! 4. Ordering of nodes is not part of the contract.

mod dependency_graph;
mod node;
mod shared;
mod snapshot;

pub use dependency_graph::DependencyGraph;
pub use node::{CellRef, Node};
pub use shared::SharedGraph;
pub use snapshot::{ReplaceSummary, Snapshot};
