//! Error taxonomy for loading and querying graphs
//!
//! Loading and querying fail in different ways, so they get separate enums:
//! a caller that only queries never has to match on I/O failures.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning an edge-list source into a graph
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source could not be opened or read
    #[error("cannot read edge list {}: {source}", .path.display())]
    Io {
        /// Path (or `<reader>` for in-memory sources) that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A non-blank, non-comment line is not a valid `u v` pair
    #[error("malformed edge on line {line}: {reason} (`{content}`)")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Raw line content
        content: String,
        /// What was wrong with it
        reason: String,
    },

    /// The source yielded different edges on the fill pass than on the count pass
    #[error("edge list changed between build passes (detected at line {line})")]
    SourceChanged {
        /// 1-based line number where the mismatch surfaced
        line: usize,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of read-only queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Query issued before any successful load
    #[error("no graph loaded")]
    NotLoaded,

    /// Node id outside `[0, node_count)`
    #[error("node {node} out of range (graph has {node_count} nodes)")]
    OutOfRange {
        /// Requested id as supplied by the caller
        node: i64,
        /// Number of nodes in the loaded graph
        node_count: usize,
    },

    /// Max-degree query on a graph with zero nodes
    #[error("graph has no nodes")]
    EmptyGraph,
}
