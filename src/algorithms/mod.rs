//! Graph algorithms (degree index, bounded BFS)
//!
//! Pure reads over an immutable [`AdjacencyStore`](crate::storage::AdjacencyStore).

pub mod degree;
pub mod traversal;

pub use degree::{degree_stats, max_degree_node, DegreeStats};
pub use traversal::{bounded_bfs, bounded_bfs_with_depths};
