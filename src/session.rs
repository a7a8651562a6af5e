//! Query facade: one session, at most one loaded graph
//!
//! The session is the boundary external callers (renderers, input forms,
//! the CLI) go through. It accepts raw signed ids so a negative id from a
//! caller surfaces as [`QueryError::OutOfRange`] rather than a type error at
//! the call site.

use crate::algorithms::DegreeStats;
use crate::error::{LoadError, QueryError};
use crate::graph::{Graph, LoadOptions};
use crate::storage::NodeId;
use std::io::BufRead;
use std::path::Path;
use tracing::warn;

/// Stateful query session owning the current graph
///
/// A failed load leaves the previous graph (or the unloaded state) in place.
///
/// # Example
///
/// ```no_run
/// use edgescope::GraphSession;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = GraphSession::new();
/// session.load("web-Google.txt")?;
///
/// let hub = session.max_degree_node()?;
/// println!("hub {hub} has degree {}", session.degree(i64::from(hub))?);
/// println!("{} nodes within 2 hops of 0", session.bfs(0, 2)?.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GraphSession {
    graph: Option<Graph>,
    options: LoadOptions,
}

impl GraphSession {
    /// Create a session with default [`LoadOptions`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that loads with `options`
    #[must_use]
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            graph: None,
            options,
        }
    }

    /// Options used by subsequent loads
    #[must_use]
    pub const fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load an edge-list file, replacing the current graph on success
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]; the session keeps its previous state.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let options = self.options;
        self.replace_with(Graph::load(path, &options))
    }

    /// Load from an in-memory or otherwise non-seekable source
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]; the session keeps its previous state.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<(), LoadError> {
        let options = self.options;
        self.replace_with(Graph::from_reader(reader, &options))
    }

    /// [`GraphSession::load`] with the build moved onto tokio's blocking pool
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`]; a panicked build task is reported as
    /// [`LoadError::Io`]. The session keeps its previous state.
    pub async fn load_async(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref().to_path_buf();
        let options = self.options;
        let task_path = path.clone();

        let built = tokio::task::spawn_blocking(move || Graph::load(&task_path, &options))
            .await
            .map_err(|e| LoadError::io(path, std::io::Error::other(e)))
            .and_then(|result| result);

        self.replace_with(built)
    }

    /// Drop the current graph, returning it
    pub fn unload(&mut self) -> Option<Graph> {
        self.graph.take()
    }

    fn replace_with(&mut self, built: Result<Graph, LoadError>) -> Result<(), LoadError> {
        match built {
            Ok(graph) => {
                self.graph = Some(graph);
                Ok(())
            }
            Err(e) => {
                if self.graph.is_some() {
                    warn!(error = %e, "load failed, keeping previous graph");
                }
                Err(e)
            }
        }
    }

    /// Whether a graph is loaded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.graph.is_some()
    }

    /// Current graph
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotLoaded`] before the first successful load.
    pub fn graph(&self) -> Result<&Graph, QueryError> {
        self.graph.as_ref().ok_or(QueryError::NotLoaded)
    }

    /// Number of nodes
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotLoaded`] before the first successful load.
    pub fn node_count(&self) -> Result<usize, QueryError> {
        Ok(self.graph()?.node_count())
    }

    /// Number of edges
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotLoaded`] before the first successful load.
    pub fn edge_count(&self) -> Result<usize, QueryError> {
        Ok(self.graph()?.edge_count())
    }

    /// Degree of `node`
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::OutOfRange`].
    pub fn degree(&self, node: i64) -> Result<usize, QueryError> {
        let graph = self.graph()?;
        graph.degree(resolve(graph, node)?)
    }

    /// Neighbors of `node` in build order
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::OutOfRange`].
    pub fn neighbors(&self, node: i64) -> Result<&[u32], QueryError> {
        let graph = self.graph()?;
        graph.neighbors(resolve(graph, node)?)
    }

    /// Nodes within `depth` hops of `start`, in discovery order
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::OutOfRange`].
    pub fn bfs(&self, start: i64, depth: u32) -> Result<Vec<u32>, QueryError> {
        let graph = self.graph()?;
        graph.bfs(resolve(graph, start)?, depth)
    }

    /// [`GraphSession::bfs`] with each node's hop distance
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::OutOfRange`].
    pub fn bfs_with_depths(
        &self,
        start: i64,
        depth: u32,
    ) -> Result<Vec<(u32, u32)>, QueryError> {
        let graph = self.graph()?;
        graph.bfs_with_depths(resolve(graph, start)?, depth)
    }

    /// Highest-degree node, smallest id on ties
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::EmptyGraph`].
    pub fn max_degree_node(&self) -> Result<u32, QueryError> {
        Ok(self.graph()?.max_degree_node()?.0)
    }

    /// Degree distribution summary
    ///
    /// # Errors
    ///
    /// [`QueryError::NotLoaded`] or [`QueryError::EmptyGraph`].
    pub fn degree_stats(&self) -> Result<DegreeStats, QueryError> {
        self.graph()?.degree_stats()
    }
}

/// Map a caller-supplied id onto `[0, node_count)`
fn resolve(graph: &Graph, node: i64) -> Result<NodeId, QueryError> {
    u32::try_from(node)
        .ok()
        .filter(|&id| (id as usize) < graph.node_count())
        .map(NodeId)
        .ok_or(QueryError::OutOfRange {
            node,
            node_count: graph.node_count(),
        })
}
