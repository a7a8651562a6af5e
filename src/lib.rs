//! edgescope: compact CSR engine for very large undirected edge lists
//!
//! # Overview
//!
//! edgescope loads plain-text edge lists (SNAP-style `u v` lines, `#`
//! comments) into an immutable CSR adjacency store and answers structural
//! queries on it: node/edge counts, degree, neighbors, the highest-degree
//! node and depth-bounded BFS.
//!
//! # Quick Start
//!
//! ```no_run
//! use edgescope::GraphSession;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = GraphSession::new();
//! session.load("web-Google.txt")?;
//!
//! println!("{} nodes, {} edges", session.node_count()?, session.edge_count()?);
//!
//! // Everything within two hops of node 0, in discovery order
//! let reached = session.bfs(0, 2)?;
//! assert_eq!(reached[0], 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: edge-list parser feeding a three-pass CSR build
//!   (count, prefix-sum, fill) with no per-node containers
//! - **Algorithms**: O(1) degree, cached max-degree scan, bounded BFS
//! - **Session**: single-owner facade with typed load/query errors; a
//!   failed load never replaces the current graph

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types
pub use algorithms::{
    bounded_bfs, bounded_bfs_with_depths, degree_stats, max_degree_node, DegreeStats,
};
pub use error::{LoadError, QueryError};
pub use graph::{Graph, LoadOptions};
pub use session::GraphSession;
pub use storage::{AdjacencyStore, EdgeListReader, NodeId};
