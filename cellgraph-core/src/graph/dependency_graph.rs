//! Dependency Graph
//!
//! The graph records ordered pairs `(s, t)` meaning "`t` depends on `s`".
//! It keeps two maps that are inverse views of the same relation:
//!
//! - `dependents[s]`: the nodes that depend on `s`
//! - `dependees[t]`: the nodes that `t` depends on
//!
//! Every mutation updates both maps before it returns, so for all nodes
//! `t ∈ dependents[s] ⇔ s ∈ dependees[t]`. A node whose set becomes empty
//! is dropped from that map, which makes "emptied" and "never seen" the
//! same state. The pair count is kept in a running counter.

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use super::node::Node;
use super::snapshot::{ReplaceSummary, Snapshot};
use crate::config::{GraphConfig, SelfDependencyPolicy};
use crate::error::{GraphError, GraphResult};

type Adjacency<N> = IndexMap<N, IndexSet<N>>;

/// Bidirectional dependency bookkeeping over opaque node identifiers.
///
/// # Example
///
/// ```rust
/// use cellgraph_core::DependencyGraph;
///
/// let mut graph: DependencyGraph = DependencyGraph::new();
/// graph.add_dependency("A1", "B1").unwrap();
/// graph.add_dependency("A2", "B1").unwrap();
///
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.dependee_count("B1"), 2);
/// assert!(graph.has_dependents("A1"));
/// assert!(!graph.has_dependees("A1"));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<N: Node = String> {
    /// Node to the set of nodes that depend on it.
    dependents: Adjacency<N>,

    /// Node to the set of nodes it depends on.
    dependees: Adjacency<N>,

    /// Number of distinct pairs currently recorded.
    size: usize,

    config: GraphConfig,
}

impl<N: Node> DependencyGraph<N> {
    /// Create a new empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new empty graph with room for `capacity` nodes per direction.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(GraphConfig::default().with_initial_capacity(capacity))
    }

    /// Create a new empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        debug!(?config, "creating dependency graph");
        Self {
            dependents: IndexMap::with_capacity(config.initial_capacity),
            dependees: IndexMap::with_capacity(config.initial_capacity),
            size: 0,
            config,
        }
    }

    /// Build a graph from a list of `(dependee, dependent)` pairs.
    pub fn try_from_pairs<I, A, B>(pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<N>,
        B: Into<N>,
    {
        let mut graph = Self::new();
        graph.try_extend(pairs)?;
        Ok(graph)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Get the number of pairs in the graph.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alias for [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get the number of nodes that `node` depends on.
    pub fn dependee_count<Q>(&self, node: &Q) -> usize
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependees.get(node).map_or(0, |set| set.len())
    }

    /// Get the number of nodes that depend on `node`.
    pub fn dependent_count<Q>(&self, node: &Q) -> usize
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents.get(node).map_or(0, |set| set.len())
    }

    /// Check whether anything depends on `node`.
    pub fn has_dependents<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependent_count(node) > 0
    }

    /// Check whether `node` depends on anything.
    pub fn has_dependees<Q>(&self, node: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependee_count(node) > 0
    }

    /// Check whether the pair `(dependee, dependent)` is recorded.
    pub fn contains<Q>(&self, dependee: &Q, dependent: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.dependents
            .get(dependee)
            .is_some_and(|set| set.contains(dependent))
    }

    /// Copy out the nodes that depend on `node`.
    ///
    /// The result is detached from the graph: later mutations do not
    /// affect it.
    pub fn dependents<Q>(&self, node: &Q) -> Snapshot<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        snapshot_of(&self.dependents, node)
    }

    /// Copy out the nodes that `node` depends on.
    pub fn dependees<Q>(&self, node: &Q) -> Snapshot<N>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        snapshot_of(&self.dependees, node)
    }

    /// Copy out every node that takes part in at least one pair.
    pub fn nodes(&self) -> Snapshot<N> {
        self.dependents
            .keys()
            .chain(
                self.dependees
                    .keys()
                    .filter(|node| !self.dependents.contains_key(*node)),
            )
            .cloned()
            .collect()
    }

    /// Iterate over every recorded `(dependee, dependent)` pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.dependents
            .iter()
            .flat_map(|(dependee, set)| set.iter().map(move |dependent| (dependee, dependent)))
    }

    /// Record that `dependent` depends on `dependee`.
    ///
    /// Returns `Ok(true)` if the pair is new and `Ok(false)` if it was
    /// already present, in which case nothing changes.
    pub fn add_dependency(
        &mut self,
        dependee: impl Into<N>,
        dependent: impl Into<N>,
    ) -> GraphResult<bool> {
        let dependee = dependee.into();
        let dependent = dependent.into();
        self.check_pair(&dependee, &dependent)?;

        if !link(&mut self.dependents, dependee.clone(), dependent.clone()) {
            return Ok(false);
        }
        link(&mut self.dependees, dependent.clone(), dependee.clone());
        self.size += 1;

        trace!(?dependee, ?dependent, size = self.size, "dependency added");
        Ok(true)
    }

    /// Remove the pair `(dependee, dependent)` if it is recorded.
    ///
    /// Returns whether a pair was removed. Absent pairs and unknown nodes
    /// are not an error.
    pub fn remove_dependency<Q>(&mut self, dependee: &Q, dependent: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !unlink(&mut self.dependents, dependee, dependent) {
            return false;
        }
        unlink(&mut self.dependees, dependent, dependee);
        self.size -= 1;

        trace!(size = self.size, "dependency removed");
        true
    }

    /// Make `new_dependents` exactly the set of nodes that depend on `node`.
    ///
    /// Duplicates in the input collapse. Only pairs that actually change
    /// touch the inverse map. Every identifier is checked before anything
    /// is modified, so on error the graph is unchanged.
    pub fn replace_dependents<I>(
        &mut self,
        node: impl Into<N>,
        new_dependents: I,
    ) -> GraphResult<ReplaceSummary>
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        let node = node.into();
        let incoming = self.collect_checked(&node, new_dependents, true)?;

        let summary = replace_in(&mut self.dependents, &mut self.dependees, &node, incoming);
        self.apply_summary(&summary);

        debug!(?node, removed = summary.removed, added = summary.added, "dependents replaced");
        Ok(summary)
    }

    /// Make `new_dependees` exactly the set of nodes that `node` depends on.
    pub fn replace_dependees<I>(
        &mut self,
        node: impl Into<N>,
        new_dependees: I,
    ) -> GraphResult<ReplaceSummary>
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        let node = node.into();
        let incoming = self.collect_checked(&node, new_dependees, false)?;

        let summary = replace_in(&mut self.dependees, &mut self.dependents, &node, incoming);
        self.apply_summary(&summary);

        debug!(?node, removed = summary.removed, added = summary.added, "dependees replaced");
        Ok(summary)
    }

    /// Add many pairs at once. All pairs are checked first; if any is
    /// rejected nothing is added. Returns the number of new pairs.
    pub fn try_extend<I, A, B>(&mut self, pairs: I) -> GraphResult<usize>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<N>,
        B: Into<N>,
    {
        let pairs: Vec<(N, N)> = pairs
            .into_iter()
            .map(|(s, t)| (s.into(), t.into()))
            .collect();
        for (s, t) in &pairs {
            self.check_pair(s, t)?;
        }

        let mut added = 0;
        for (s, t) in pairs {
            if self.add_dependency(s, t)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Remove every pair.
    pub fn clear(&mut self) {
        self.dependents.clear();
        self.dependees.clear();
        self.size = 0;
    }

    /// Verify that both views mirror each other, that no empty sets are
    /// retained, and that the counter matches the stored pairs.
    pub fn check_invariants(&self) -> GraphResult<()> {
        let forward = check_side(&self.dependents, &self.dependees, "dependents")?;
        let backward = check_side(&self.dependees, &self.dependents, "dependees")?;

        if forward != self.size || backward != self.size {
            return Err(GraphError::InvariantViolation(format!(
                "size is {} but dependents hold {forward} and dependees hold {backward}",
                self.size
            )));
        }
        Ok(())
    }

    fn validate(&self, node: &N) -> GraphResult<()> {
        if node.is_valid() {
            Ok(())
        } else {
            debug!(?node, "rejected invalid node identifier");
            Err(GraphError::invalid_input(format!("{node:?} is not a valid node identifier")))
        }
    }

    fn check_pair(&self, dependee: &N, dependent: &N) -> GraphResult<()> {
        self.validate(dependee)?;
        self.validate(dependent)?;
        if dependee == dependent && self.config.self_dependency == SelfDependencyPolicy::Reject {
            debug!(node = ?dependee, "rejected self dependency");
            return Err(GraphError::SelfDependency(format!("{dependee:?}")));
        }
        Ok(())
    }

    /// De-duplicate and check the incoming side of a replacement.
    fn collect_checked<I>(
        &self,
        node: &N,
        incoming: I,
        node_is_dependee: bool,
    ) -> GraphResult<IndexSet<N>>
    where
        I: IntoIterator,
        I::Item: Into<N>,
    {
        self.validate(node)?;
        let incoming: IndexSet<N> = incoming.into_iter().map(Into::into).collect();
        for other in &incoming {
            if node_is_dependee {
                self.check_pair(node, other)?;
            } else {
                self.check_pair(other, node)?;
            }
        }
        Ok(incoming)
    }

    fn apply_summary(&mut self, summary: &ReplaceSummary) {
        self.size = self.size - summary.removed + summary.added;
    }
}

impl<N: Node> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot_of<N, Q>(map: &Adjacency<N>, node: &Q) -> Snapshot<N>
where
    N: Node + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    map.get(node)
        .map(|set| set.iter().cloned().collect::<Snapshot<N>>())
        .unwrap_or_default()
}

/// Insert `value` into `map[key]`, creating the set if needed.
fn link<N: Node>(map: &mut Adjacency<N>, key: N, value: N) -> bool {
    map.entry(key).or_default().insert(value)
}

/// Remove `value` from `map[key]`, dropping the set once it is empty.
fn unlink<N, Q>(map: &mut Adjacency<N>, key: &Q, value: &Q) -> bool
where
    N: Node + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    if !set.swap_remove(value) {
        return false;
    }
    if set.is_empty() {
        map.swap_remove(key);
    }
    true
}

/// Set `primary[node]` to `incoming` and patch `mirror` for every pair that
/// was dropped or introduced.
fn replace_in<N: Node>(
    primary: &mut Adjacency<N>,
    mirror: &mut Adjacency<N>,
    node: &N,
    incoming: IndexSet<N>,
) -> ReplaceSummary {
    let previous = primary.swap_remove(node).unwrap_or_default();
    let mut summary = ReplaceSummary::default();

    for gone in previous.iter().filter(|other| !incoming.contains(*other)) {
        unlink(mirror, gone, node);
        summary.removed += 1;
    }
    for fresh in incoming.iter().filter(|other| !previous.contains(*other)) {
        link(mirror, fresh.clone(), node.clone());
        summary.added += 1;
    }

    if !incoming.is_empty() {
        primary.insert(node.clone(), incoming);
    }
    summary
}

/// Check one direction against its mirror and return its pair count.
fn check_side<N: Node>(side: &Adjacency<N>, mirror: &Adjacency<N>, name: &str) -> GraphResult<usize> {
    let mut count = 0;
    for (node, set) in side {
        if set.is_empty() {
            return Err(GraphError::InvariantViolation(format!(
                "{name} keeps an empty set for {node:?}"
            )));
        }
        for other in set {
            if !mirror.get(other).is_some_and(|back| back.contains(node)) {
                return Err(GraphError::InvariantViolation(format!(
                    "{name} has {node:?} -> {other:?} without its mirror entry"
                )));
            }
        }
        count += set.len();
    }
    Ok(count)
}
