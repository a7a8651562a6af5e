//! Graph storage layer
//!
//! Provides edge-list parsing and the CSR adjacency store it feeds.

pub mod csr;
pub mod edge_list;

pub use csr::{AdjacencyFiller, AdjacencyStore, DegreeCounter, DegreeMismatch, NodeId};
pub use edge_list::{EdgeListReader, DEFAULT_COMMENT_PREFIX};
