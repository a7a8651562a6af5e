//! Bounded breadth-first search
//!
//! Level-synchronous FIFO frontier in the style of Ligra (Shun & Blelloch,
//! `PPoPP` 2013), cut off at a maximum depth. Nodes at exactly the cutoff are
//! reported but never expanded.

use crate::error::QueryError;
use crate::storage::{AdjacencyStore, NodeId};
use std::collections::VecDeque;

const UNVISITED: u32 = u32::MAX;

/// All nodes within `max_depth` hops of `start`, in discovery order
///
/// `start` is always first. `max_depth = 0` yields exactly `[start]`.
///
/// # Errors
///
/// Returns [`QueryError::OutOfRange`] if `start` is not in the graph.
///
/// # Example
///
/// ```
/// use edgescope::{bounded_bfs, AdjacencyStore, NodeId};
///
/// // Path 0 - 1 - 2 - 3
/// let store = AdjacencyStore::from_edges(&[
///     (NodeId(0), NodeId(1)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(2), NodeId(3)),
/// ]);
///
/// assert_eq!(bounded_bfs(&store, NodeId(0), 2).unwrap(), vec![0, 1, 2]);
/// assert_eq!(bounded_bfs(&store, NodeId(2), 1).unwrap(), vec![2, 1, 3]);
/// ```
pub fn bounded_bfs(
    store: &AdjacencyStore,
    start: NodeId,
    max_depth: u32,
) -> Result<Vec<u32>, QueryError> {
    let mut reached = Vec::new();
    walk(store, start, max_depth, |node, _| reached.push(node))?;
    Ok(reached)
}

/// Like [`bounded_bfs`], paired with each node's hop distance from `start`
///
/// # Errors
///
/// Returns [`QueryError::OutOfRange`] if `start` is not in the graph.
pub fn bounded_bfs_with_depths(
    store: &AdjacencyStore,
    start: NodeId,
    max_depth: u32,
) -> Result<Vec<(u32, u32)>, QueryError> {
    let mut reached = Vec::new();
    walk(store, start, max_depth, |node, distance| {
        reached.push((node, distance));
    })?;
    Ok(reached)
}

fn walk(
    store: &AdjacencyStore,
    start: NodeId,
    max_depth: u32,
    mut visit: impl FnMut(u32, u32),
) -> Result<(), QueryError> {
    store.neighbor_count(start)?;

    let mut distance = vec![UNVISITED; store.num_nodes()];
    let mut frontier = VecDeque::new();

    distance[start.index()] = 0;
    frontier.push_back(start.0);
    visit(start.0, 0);

    while let Some(current) = frontier.pop_front() {
        let d = distance[current as usize];
        if d >= max_depth {
            continue;
        }

        for &neighbor in store.block(current as usize) {
            let slot = &mut distance[neighbor as usize];
            if *slot == UNVISITED {
                *slot = d + 1;
                visit(neighbor, d + 1);
                frontier.push_back(neighbor);
            }
        }
    }

    Ok(())
}
