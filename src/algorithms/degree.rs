//! Degree queries over the CSR store
//!
//! Degrees are offset differences, so nothing here allocates.

use crate::error::QueryError;
use crate::storage::{AdjacencyStore, NodeId};

/// Summary of the degree distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeStats {
    /// Smallest degree
    pub min: usize,
    /// Largest degree
    pub max: usize,
    /// Average degree (`2E / N`)
    pub mean: f64,
    /// Nodes with degree 0 (ids inside the range that no edge mentions)
    pub isolated: usize,
}

/// Node with the largest degree, smallest id on ties
///
/// Single O(N) scan; a node only replaces the current best with a strictly
/// greater degree.
///
/// # Errors
///
/// Returns [`QueryError::EmptyGraph`] if the store has no nodes.
///
/// # Example
///
/// ```
/// use edgescope::{max_degree_node, AdjacencyStore, NodeId};
///
/// // 1 and 2 both have degree 2
/// let store = AdjacencyStore::from_edges(&[
///     (NodeId(0), NodeId(2)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(1), NodeId(3)),
/// ]);
///
/// assert_eq!(max_degree_node(&store).unwrap(), NodeId(1));
/// ```
pub fn max_degree_node(store: &AdjacencyStore) -> Result<NodeId, QueryError> {
    let mut best: Option<(usize, usize)> = None;
    for (node, degree) in store.degrees().enumerate() {
        match best {
            Some((_, best_degree)) if degree <= best_degree => {}
            _ => best = Some((node, degree)),
        }
    }

    let (node, _) = best.ok_or(QueryError::EmptyGraph)?;
    #[allow(clippy::cast_possible_truncation)] // ids come from u32 input
    let id = node as u32;
    Ok(NodeId(id))
}

/// Min / max / mean degree and isolated-node count
///
/// # Errors
///
/// Returns [`QueryError::EmptyGraph`] if the store has no nodes.
pub fn degree_stats(store: &AdjacencyStore) -> Result<DegreeStats, QueryError> {
    let n = store.num_nodes();
    if n == 0 {
        return Err(QueryError::EmptyGraph);
    }

    let mut min = usize::MAX;
    let mut max = 0;
    let mut isolated = 0;
    for degree in store.degrees() {
        min = min.min(degree);
        max = max.max(degree);
        if degree == 0 {
            isolated += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = store.neighbor_slots().len() as f64 / n as f64;

    Ok(DegreeStats {
        min,
        max,
        mean,
        isolated,
    })
}
