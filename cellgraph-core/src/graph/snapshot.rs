//! Query results.
//!
//! Enumeration queries hand back owned copies rather than borrowed views,
//! so a result stays valid and unchanged while the graph keeps mutating.

use smallvec::SmallVec;

/// Most cells reference only a handful of others.
const INLINE_NODES: usize = 4;

/// An owned, restartable sequence of nodes copied out of the graph at
/// query time. Order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<N> {
    nodes: SmallVec<[N; INLINE_NODES]>,
}

impl<N> Snapshot<N> {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: SmallVec::new(),
        }
    }

    /// Iterate over the captured nodes. May be called any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool
    where
        N: PartialEq,
    {
        self.nodes.contains(node)
    }

    /// Consume the snapshot into a plain vector.
    pub fn into_vec(self) -> Vec<N> {
        self.nodes.into_vec()
    }
}

impl<N> Default for Snapshot<N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N> FromIterator<N> for Snapshot<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<N> IntoIterator for Snapshot<N> {
    type Item = N;
    type IntoIter = smallvec::IntoIter<[N; INLINE_NODES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a Snapshot<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// How many pairs a bulk replacement removed and added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub removed: usize,
    pub added: usize,
}

impl ReplaceSummary {
    /// Net change in graph size.
    pub fn delta(&self) -> isize {
        self.added as isize - self.removed as isize
    }

    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.added == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_restartable() {
        let snapshot: Snapshot<u32> = [1, 2, 3].into_iter().collect();

        let first: Vec<_> = snapshot.iter().copied().collect();
        let second: Vec<_> = snapshot.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.contains(&2));
    }

    #[test]
    fn empty_snapshot_yields_nothing() {
        let snapshot = Snapshot::<String>::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.into_iter().next(), None);
    }

    #[test]
    fn spills_past_inline_capacity() {
        let snapshot: Snapshot<u32> = (0..32).collect();
        assert_eq!(snapshot.into_vec(), (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn summary_delta() {
        let summary = ReplaceSummary { removed: 1, added: 2 };
        assert_eq!(summary.delta(), 1);
        assert!(!summary.is_noop());
        assert!(ReplaceSummary::default().is_noop());
    }
}
