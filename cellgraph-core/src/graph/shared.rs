//! Shared Graph Handle
//!
//! [`DependencyGraph`] has no internal synchronization. Updating one pair
//! touches two maps, so a reader racing a writer could see one view
//! updated and the other not. `SharedGraph` puts the whole graph behind a
//! single reader-writer lock: each closure passed to [`SharedGraph::read`]
//! or [`SharedGraph::write`] sees the graph with every invariant intact.

use std::sync::Arc;

use parking_lot::RwLock;

use super::dependency_graph::DependencyGraph;
use super::node::Node;
use crate::config::GraphConfig;

/// A cloneable handle to one dependency graph guarded by a lock.
///
/// Clones refer to the same graph. Separate calls to [`SharedGraph::new`]
/// produce unrelated graphs.
#[derive(Debug)]
pub struct SharedGraph<N: Node = String> {
    inner: Arc<RwLock<DependencyGraph<N>>>,
}

impl<N: Node> SharedGraph<N> {
    pub fn new() -> Self {
        Self::from_graph(DependencyGraph::new())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self::from_graph(DependencyGraph::with_config(config))
    }

    /// Wrap an existing graph.
    pub fn from_graph(graph: DependencyGraph<N>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Run `f` with shared access to the graph.
    pub fn read<R>(&self, f: impl FnOnce(&DependencyGraph<N>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the graph.
    pub fn write<R>(&self, f: impl FnOnce(&mut DependencyGraph<N>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Copy the current graph out from under the lock.
    pub fn snapshot(&self) -> DependencyGraph<N> {
        self.inner.read().clone()
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }
}

impl<N: Node> Clone for SharedGraph<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Node> Default for SharedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_graph() {
        let shared: SharedGraph = SharedGraph::new();
        let other = shared.clone();

        shared.write(|g| g.add_dependency("a", "b")).unwrap();
        assert_eq!(other.size(), 1);
        assert!(other.read(|g| g.contains("a", "b")));
    }

    #[test]
    fn separate_handles_are_isolated() {
        let first: SharedGraph = SharedGraph::new();
        let second: SharedGraph = SharedGraph::new();

        first.write(|g| g.add_dependency("x", "y")).unwrap();
        assert_eq!(first.size(), 1);
        assert_eq!(second.size(), 0);
    }

    #[test]
    fn snapshot_is_detached() {
        let shared: SharedGraph = SharedGraph::new();
        shared.write(|g| g.add_dependency("a", "b")).unwrap();

        let copy = shared.snapshot();
        shared.write(|g| g.remove_dependency("a", "b"));

        assert_eq!(copy.size(), 1);
        assert_eq!(shared.size(), 0);
    }

    #[test]
    fn concurrent_writers_keep_invariants() {
        use std::thread;

        let shared: SharedGraph<u32> = SharedGraph::new();
        let handles: Vec<_> = (0..4u32)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..100u32 {
                        shared.write(|g| g.add_dependency(worker, 1000 + i)).unwrap();
                        if i % 3 == 0 {
                            shared.write(|g| g.remove_dependency(&worker, &(1000 + i)));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        shared.read(|g| g.check_invariants()).unwrap();
        // 34 of each worker's 100 pairs were removed again.
        assert_eq!(shared.size(), 4 * 66);
    }
}
