//! CSR (Compressed Sparse Row) adjacency store for undirected edge lists
//!
//! Every edge `(u, v)` occupies two slots: `v` in `u`'s block and `u` in
//! `v`'s block.
//!
//! # CSR Format
//!
//! ```text
//! Edges: (0, 1), (0, 2), (1, 2)
//!
//! CSR:
//!   offsets:   [0, 2, 4, 6]        // Node 0: slots [0..2), Node 1: [2..4), Node 2: [4..6)
//!   neighbors: [1, 2, 0, 2, 0, 1]  // blocks filled in edge order
//! ```
//!
//! # Build
//!
//! The store is built in three passes without growing any per-node container:
//! [`DegreeCounter`] counts slots per node, [`DegreeCounter::into_filler`]
//! turns the counts into offsets, and [`AdjacencyFiller`] writes each edge
//! into the next free slot of both endpoints.

use crate::error::QueryError;
use std::fmt;
use thiserror::Error;

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this node in dense per-node arrays
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An edge that does not fit the degrees counted in the first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("edge ({u}, {v}) does not match the counted degrees")]
pub struct DegreeMismatch {
    /// First endpoint
    pub u: NodeId,
    /// Second endpoint
    pub v: NodeId,
}

/// Count pass: per-node slot counts and the edge total
#[derive(Debug, Clone, Default)]
pub struct DegreeCounter {
    degrees: Vec<usize>,
    num_edges: usize,
}

impl DegreeCounter {
    /// Create an empty counter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edge; grows the node range to cover both endpoints
    pub fn count(&mut self, u: NodeId, v: NodeId) {
        let highest = u.index().max(v.index());
        if highest >= self.degrees.len() {
            self.degrees.resize(highest + 1, 0);
        }
        self.degrees[u.index()] += 1;
        self.degrees[v.index()] += 1;
        self.num_edges += 1;
    }

    /// `max_id + 1` over all counted edges (0 if none)
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.degrees.len()
    }

    /// Number of counted edges
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Offset pass: prefix-sum the counts and allocate the slot array once
    #[must_use]
    pub fn into_filler(self) -> AdjacencyFiller {
        let mut offsets = Vec::with_capacity(self.degrees.len() + 1);
        let mut running = 0_usize;
        offsets.push(running);
        for degree in &self.degrees {
            running += degree;
            offsets.push(running);
        }

        let cursors = offsets[..self.degrees.len()].to_vec();

        AdjacencyFiller {
            neighbors: vec![0; running],
            offsets,
            cursors,
            expected_edges: self.num_edges,
            filled_edges: 0,
        }
    }
}

/// Fill pass: writes each edge into both endpoints' blocks
#[derive(Debug, Clone)]
pub struct AdjacencyFiller {
    offsets: Vec<usize>,
    /// Next free slot per node, starts at `offsets[i]`
    cursors: Vec<usize>,
    neighbors: Vec<u32>,
    expected_edges: usize,
    filled_edges: usize,
}

impl AdjacencyFiller {
    /// Place `v` in `u`'s block and `u` in `v`'s block
    ///
    /// # Errors
    ///
    /// Returns [`DegreeMismatch`] if either endpoint is outside the counted
    /// range or its block is already full.
    pub fn fill(&mut self, u: NodeId, v: NodeId) -> Result<(), DegreeMismatch> {
        let mismatch = DegreeMismatch { u, v };
        let n = self.cursors.len();
        if u.index() >= n || v.index() >= n {
            return Err(mismatch);
        }

        // Self-loops take two slots in the same block
        let needed_u = if u == v { 2 } else { 1 };
        if self.cursors[u.index()] + needed_u > self.offsets[u.index() + 1]
            || self.cursors[v.index()] >= self.offsets[v.index() + 1]
        {
            return Err(mismatch);
        }

        self.place(u, v);
        Ok(())
    }

    fn place(&mut self, u: NodeId, v: NodeId) {
        let slot = self.cursors[u.index()];
        self.neighbors[slot] = v.0;
        self.cursors[u.index()] += 1;

        let slot = self.cursors[v.index()];
        self.neighbors[slot] = u.0;
        self.cursors[v.index()] += 1;

        self.filled_edges += 1;
    }

    /// Finish the build
    ///
    /// # Errors
    ///
    /// Returns the number of edges actually filled if it differs from the
    /// number counted.
    pub fn finish(self) -> Result<AdjacencyStore, usize> {
        if self.filled_edges != self.expected_edges {
            return Err(self.filled_edges);
        }
        Ok(AdjacencyStore {
            offsets: self.offsets,
            neighbors: self.neighbors,
        })
    }
}

/// Immutable undirected adjacency in CSR layout
///
/// Optimized for:
/// - O(1) degree lookup (difference of two offsets)
/// - O(1) access to a node's neighbor slice
/// - No per-node heap allocation, even for tens of millions of edges
///
/// # Example
///
/// ```
/// use edgescope::{AdjacencyStore, NodeId};
///
/// let store = AdjacencyStore::from_edges(&[(NodeId(0), NodeId(1)), (NodeId(0), NodeId(2))]);
///
/// assert_eq!(store.neighbors_of(NodeId(0)).unwrap(), &[1, 2]);
/// assert_eq!(store.neighbors_of(NodeId(2)).unwrap(), &[0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyStore {
    /// Node i's neighbors live in `neighbors[offsets[i]..offsets[i + 1]]`
    /// Length: `num_nodes` + 1, last entry is `2 * num_edges`
    offsets: Vec<usize>,

    /// Flattened neighbor blocks
    /// Length: `2 * num_edges`
    neighbors: Vec<u32>,
}

impl AdjacencyStore {
    /// Create an empty store (no nodes, no edges)
    #[must_use]
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            neighbors: Vec::new(),
        }
    }

    /// Build from an in-memory edge list
    #[must_use]
    pub fn from_edges(edges: &[(NodeId, NodeId)]) -> Self {
        let mut counter = DegreeCounter::new();
        for &(u, v) in edges {
            counter.count(u, v);
        }

        let mut filler = counter.into_filler();
        for &(u, v) in edges {
            // Counted from the same slice, so every block has room
            filler.place(u, v);
        }

        Self {
            offsets: filler.offsets,
            neighbors: filler.neighbors,
        }
    }

    /// Number of nodes (`max_id + 1`)
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of loaded edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Slot count of `node`, failing on ids outside `[0, num_nodes)`
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `node` is not in the graph
    pub fn neighbor_count(&self, node: NodeId) -> Result<usize, QueryError> {
        let idx = self.check(node)?;
        Ok(self.offsets[idx + 1] - self.offsets[idx])
    }

    /// Neighbor block of `node` in fill order (not sorted)
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `node` is not in the graph
    pub fn neighbors_of(&self, node: NodeId) -> Result<&[u32], QueryError> {
        let idx = self.check(node)?;
        Ok(&self.neighbors[self.offsets[idx]..self.offsets[idx + 1]])
    }

    /// Unchecked block access for traversal over ids taken from the store
    pub(crate) fn block(&self, idx: usize) -> &[u32] {
        &self.neighbors[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Degrees of all nodes in id order
    pub fn degrees(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.offsets.windows(2).map(|w| w[1] - w[0])
    }

    /// Sort every neighbor block ascending
    ///
    /// Makes neighbor and BFS order independent of input line order.
    pub fn sort_neighbor_blocks(&mut self) {
        for w in self.offsets.windows(2) {
            self.neighbors[w[0]..w[1]].sort_unstable();
        }
    }

    /// Estimated heap footprint of both arrays in bytes
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.offsets.len() * std::mem::size_of::<usize>()
            + self.neighbors.len() * std::mem::size_of::<u32>()
    }

    /// Raw offsets array (length `num_nodes + 1`)
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Raw flattened neighbor array (length `2 * num_edges`)
    #[must_use]
    pub fn neighbor_slots(&self) -> &[u32] {
        &self.neighbors
    }

    fn check(&self, node: NodeId) -> Result<usize, QueryError> {
        let idx = node.index();
        if idx >= self.num_nodes() {
            return Err(QueryError::OutOfRange {
                node: i64::from(node.0),
                node_count: self.num_nodes(),
            });
        }
        Ok(idx)
    }
}

impl Default for AdjacencyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(u32, u32)]) -> Vec<(NodeId, NodeId)> {
        pairs.iter().map(|&(u, v)| (NodeId(u), NodeId(v))).collect()
    }

    #[test]
    fn test_empty_store() {
        let store = AdjacencyStore::new();
        assert_eq!(store.num_nodes(), 0);
        assert_eq!(store.num_edges(), 0);
        assert_eq!(store.offsets(), &[0]);
        assert_eq!(AdjacencyStore::from_edges(&[]), store);
    }

    #[test]
    fn test_from_edges_simple() {
        let store = AdjacencyStore::from_edges(&edges(&[(0, 1), (0, 2), (1, 2)]));

        assert_eq!(store.num_nodes(), 3);
        assert_eq!(store.num_edges(), 3);
        assert_eq!(store.offsets(), &[0, 2, 4, 6]);
        assert_eq!(store.neighbor_slots(), &[1, 2, 0, 2, 0, 1]);
    }

    #[test]
    fn test_neighbors_are_reciprocal() {
        let store = AdjacencyStore::from_edges(&edges(&[(3, 0)]));

        assert_eq!(store.num_nodes(), 4);
        assert_eq!(store.neighbors_of(NodeId(0)).unwrap(), &[3]);
        assert_eq!(store.neighbors_of(NodeId(3)).unwrap(), &[0]);

        let empty: &[u32] = &[];
        assert_eq!(store.neighbors_of(NodeId(1)).unwrap(), empty);
        assert_eq!(store.neighbor_count(NodeId(2)).unwrap(), 0);
    }

    #[test]
    fn test_fill_order_is_edge_order() {
        let store = AdjacencyStore::from_edges(&edges(&[(0, 5), (0, 2), (4, 0)]));
        assert_eq!(store.neighbors_of(NodeId(0)).unwrap(), &[5, 2, 4]);
    }

    #[test]
    fn test_self_loop_takes_two_slots() {
        let store = AdjacencyStore::from_edges(&edges(&[(1, 1), (0, 1)]));

        assert_eq!(store.neighbor_count(NodeId(1)).unwrap(), 3);
        assert_eq!(store.neighbors_of(NodeId(1)).unwrap(), &[1, 1, 0]);
        assert_eq!(store.degrees().sum::<usize>(), 2 * store.num_edges());
    }

    #[test]
    fn test_multi_edges_kept() {
        let store = AdjacencyStore::from_edges(&edges(&[(0, 1), (1, 0)]));
        assert_eq!(store.num_edges(), 2);
        assert_eq!(store.neighbors_of(NodeId(0)).unwrap(), &[1, 1]);
    }

    #[test]
    fn test_out_of_range() {
        let store = AdjacencyStore::from_edges(&edges(&[(0, 1)]));
        assert_eq!(
            store.neighbors_of(NodeId(2)),
            Err(QueryError::OutOfRange {
                node: 2,
                node_count: 2
            })
        );
        assert!(store.neighbor_count(NodeId(u32::MAX)).is_err());
    }

    #[test]
    fn test_sort_neighbor_blocks() {
        let mut store = AdjacencyStore::from_edges(&edges(&[(0, 3), (0, 1), (0, 2)]));
        store.sort_neighbor_blocks();
        assert_eq!(store.neighbors_of(NodeId(0)).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_filler_matches_from_edges() {
        let list = edges(&[(0, 1), (2, 1), (2, 2)]);
        let mut counter = DegreeCounter::new();
        for &(u, v) in &list {
            counter.count(u, v);
        }
        assert_eq!(counter.num_nodes(), 3);
        assert_eq!(counter.num_edges(), 3);

        let mut filler = counter.into_filler();
        for &(u, v) in &list {
            filler.fill(u, v).unwrap();
        }
        assert_eq!(filler.finish().unwrap(), AdjacencyStore::from_edges(&list));
    }

    #[test]
    fn test_filler_rejects_uncounted_edges() {
        let mut counter = DegreeCounter::new();
        counter.count(NodeId(0), NodeId(1));
        let mut filler = counter.into_filler();

        assert!(filler.fill(NodeId(0), NodeId(2)).is_err());
        filler.fill(NodeId(1), NodeId(0)).unwrap();
        assert_eq!(
            filler.fill(NodeId(0), NodeId(1)),
            Err(DegreeMismatch {
                u: NodeId(0),
                v: NodeId(1)
            })
        );
    }

    #[test]
    fn test_filler_rejects_missing_edges() {
        let mut counter = DegreeCounter::new();
        counter.count(NodeId(0), NodeId(1));
        counter.count(NodeId(1), NodeId(2));
        let mut filler = counter.into_filler();
        filler.fill(NodeId(0), NodeId(1)).unwrap();

        assert_eq!(filler.finish(), Err(1));
    }

    #[test]
    fn test_memory_estimate() {
        let store = AdjacencyStore::from_edges(&edges(&[(0, 1)]));
        assert_eq!(
            store.memory_bytes(),
            3 * std::mem::size_of::<usize>() + 2 * std::mem::size_of::<u32>()
        );
    }
}
