//! Immutable loaded graph: CSR store plus cached degree results
//!
//! A [`Graph`] is built once from an edge-list source and never changes.
//! File loads stream the source twice (count pass, rewind, fill pass) so
//! no intermediate edge buffer is held for multi-million edge inputs.

use crate::algorithms::{self, DegreeStats};
use crate::error::{LoadError, QueryError};
use crate::storage::{
    AdjacencyStore, DegreeCounter, EdgeListReader, NodeId, DEFAULT_COMMENT_PREFIX,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Options for reading an edge list
///
/// # Example
///
/// ```
/// use edgescope::LoadOptions;
///
/// let options = LoadOptions::new().comment_prefix('%').sort_neighbors(true);
/// assert_eq!(options.comment, '%');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Lines starting with this character are skipped
    pub comment: char,
    /// Sort each neighbor block ascending after the build
    pub sorted: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT_PREFIX,
            sorted: false,
        }
    }
}

impl LoadOptions {
    /// Default options: `#` comments, neighbors in input order
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment marker
    #[must_use]
    pub const fn comment_prefix(mut self, prefix: char) -> Self {
        self.comment = prefix;
        self
    }

    /// Toggle ascending neighbor order
    #[must_use]
    pub const fn sort_neighbors(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

/// Undirected graph loaded from an edge list
///
/// # Example
///
/// ```
/// use edgescope::{Graph, NodeId};
///
/// let graph = Graph::from_edges(&[(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2))]);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.degree(NodeId(1)).unwrap(), 2);
/// assert_eq!(graph.bfs(NodeId(0), 1).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug)]
pub struct Graph {
    store: AdjacencyStore,
    max_degree: OnceLock<Result<NodeId, QueryError>>,
}

impl Graph {
    /// Wrap an already built store
    #[must_use]
    pub fn from_store(store: AdjacencyStore) -> Self {
        Self {
            store,
            max_degree: OnceLock::new(),
        }
    }

    /// Build from an in-memory edge list
    #[must_use]
    pub fn from_edges(edges: &[(NodeId, NodeId)]) -> Self {
        Self::from_store(AdjacencyStore::from_edges(edges))
    }

    /// Load an edge-list file, streaming it once per build pass
    ///
    /// # Errors
    ///
    /// - [`LoadError::Io`] if the file cannot be opened, read or rewound
    /// - [`LoadError::Parse`] on the first malformed line
    /// - [`LoadError::SourceChanged`] if the file changed between passes
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_seekable(BufReader::new(file), path, options)
    }

    /// Two-pass streaming build from a rewindable source
    ///
    /// `name` labels the source in I/O errors.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::load`].
    pub fn from_seekable<R: BufRead + Seek>(
        mut reader: R,
        name: impl Into<PathBuf>,
        options: &LoadOptions,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        let started = Instant::now();

        let mut counter = DegreeCounter::new();
        for edge in Self::edges(&mut reader, &name, options) {
            let (u, v) = edge?;
            counter.count(u, v);
        }
        debug!(
            nodes = counter.num_nodes(),
            edges = counter.num_edges(),
            "count pass done"
        );

        reader.rewind().map_err(|e| LoadError::io(&name, e))?;

        let mut filler = counter.into_filler();
        let mut edges = Self::edges(&mut reader, &name, options);
        while let Some(edge) = edges.next() {
            let (u, v) = edge?;
            filler.fill(u, v).map_err(|_| LoadError::SourceChanged {
                line: edges.line_number(),
            })?;
        }
        let line = edges.line_number();
        let store = filler
            .finish()
            .map_err(|_| LoadError::SourceChanged { line })?;

        Ok(Self::finish_load(store, options, &name, started))
    }

    /// Build from a one-shot source, buffering the parsed edges
    ///
    /// # Errors
    ///
    /// - [`LoadError::Io`] if reading fails
    /// - [`LoadError::Parse`] on the first malformed line
    pub fn from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Self, LoadError> {
        let name = PathBuf::from("<reader>");
        let started = Instant::now();

        let edges = Self::edges(reader, &name, options).collect::<Result<Vec<_>, _>>()?;
        let store = AdjacencyStore::from_edges(&edges);

        Ok(Self::finish_load(store, options, &name, started))
    }

    fn edges<R: BufRead>(reader: R, name: &Path, options: &LoadOptions) -> EdgeListReader<R> {
        EdgeListReader::new(reader)
            .comment_prefix(options.comment)
            .source_name(name)
    }

    fn finish_load(
        mut store: AdjacencyStore,
        options: &LoadOptions,
        name: &Path,
        started: Instant,
    ) -> Self {
        if options.sorted {
            store.sort_neighbor_blocks();
        }

        #[allow(clippy::cast_precision_loss)]
        let memory_mib = store.memory_bytes() as f64 / BYTES_PER_MIB;
        info!(
            source = %name.display(),
            nodes = store.num_nodes(),
            edges = store.num_edges(),
            memory_mib = format_args!("{memory_mib:.2}"),
            elapsed_ms = started.elapsed().as_millis(),
            "edge list loaded"
        );

        Self::from_store(store)
    }

    /// Number of nodes (`max_id + 1`)
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.store.num_nodes()
    }

    /// Number of loaded edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.num_edges()
    }

    /// Degree of `node`
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `node` is not in the graph.
    pub fn degree(&self, node: NodeId) -> Result<usize, QueryError> {
        self.store.neighbor_count(node)
    }

    /// Neighbors of `node` in build order
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `node` is not in the graph.
    pub fn neighbors(&self, node: NodeId) -> Result<&[u32], QueryError> {
        self.store.neighbors_of(node)
    }

    /// Nodes within `depth` hops of `start`, in discovery order
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `start` is not in the graph.
    pub fn bfs(&self, start: NodeId, depth: u32) -> Result<Vec<u32>, QueryError> {
        let started = Instant::now();
        let reached = algorithms::bounded_bfs(&self.store, start, depth)?;
        debug!(
            %start,
            depth,
            reached = reached.len(),
            elapsed_us = started.elapsed().as_micros(),
            "bounded bfs"
        );
        Ok(reached)
    }

    /// [`Graph::bfs`] with each node's hop distance
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OutOfRange`] if `start` is not in the graph.
    pub fn bfs_with_depths(
        &self,
        start: NodeId,
        depth: u32,
    ) -> Result<Vec<(u32, u32)>, QueryError> {
        algorithms::bounded_bfs_with_depths(&self.store, start, depth)
    }

    /// Highest-degree node, smallest id on ties; computed once
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyGraph`] if the graph has no nodes.
    pub fn max_degree_node(&self) -> Result<NodeId, QueryError> {
        self.max_degree
            .get_or_init(|| {
                let best = algorithms::max_degree_node(&self.store);
                debug!(result = ?best, "max degree scan");
                best
            })
            .clone()
    }

    /// Degree distribution summary
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyGraph`] if the graph has no nodes.
    pub fn degree_stats(&self) -> Result<DegreeStats, QueryError> {
        algorithms::degree_stats(&self.store)
    }

    /// Underlying CSR store
    #[must_use]
    pub const fn store(&self) -> &AdjacencyStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ChangingSource;
    use std::io::Cursor;

    const SAMPLE: &str = "# sample tree\n0 1\n0 2\n1 3\n1 4\n2 5\n2 6\n3 7\n";

    #[test]
    fn test_seekable_and_buffered_builds_agree() {
        let options = LoadOptions::default();
        let a = Graph::from_seekable(Cursor::new(SAMPLE), "sample", &options).unwrap();
        let b = Graph::from_reader(SAMPLE.as_bytes(), &options).unwrap();

        assert_eq!(a.store(), b.store());
        assert_eq!(a.node_count(), 8);
        assert_eq!(a.edge_count(), 7);
    }

    #[test]
    fn test_sample_queries() {
        let g = Graph::from_reader(SAMPLE.as_bytes(), &LoadOptions::default()).unwrap();

        assert_eq!(g.degree(NodeId(0)).unwrap(), 2);
        assert_eq!(g.neighbors(NodeId(1)).unwrap(), &[0, 3, 4]);
        assert_eq!(g.bfs(NodeId(0), 2).unwrap(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(g.max_degree_node().unwrap(), NodeId(1));
        // Cached value is stable
        assert_eq!(g.max_degree_node().unwrap(), NodeId(1));
    }

    #[test]
    fn test_sorted_option() {
        let text = "0 3\n0 1\n0 2\n";
        let g = Graph::from_reader(text.as_bytes(), &LoadOptions::new().sort_neighbors(true))
            .unwrap();
        assert_eq!(g.neighbors(NodeId(0)).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_parse_failure_reports_line() {
        let err = Graph::from_seekable(
            Cursor::new("0 1\n# ok\nfoo bar\n"),
            "bad",
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_extra_edge_on_fill_pass() {
        // Node 0 was counted with one slot, the rewritten source gives it two
        let source = ChangingSource::new("0 1\n1 2\n", "0 1\n0 2\n");
        let err = Graph::from_seekable(source, "rewritten", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::SourceChanged { line: 2 }));
    }

    #[test]
    fn test_missing_edge_on_fill_pass() {
        let source = ChangingSource::new("0 1\n1 2\n", "0 1\n");
        let err = Graph::from_seekable(source, "truncated", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::SourceChanged { line: 1 }));
    }

    #[test]
    fn test_unchanged_source_after_rewind() {
        let source = ChangingSource::new(SAMPLE, SAMPLE);
        let g = Graph::from_seekable(source, "stable", &LoadOptions::default()).unwrap();
        assert_eq!(g.edge_count(), 7);
    }

    #[test]
    fn test_empty_source() {
        let g = Graph::from_reader("# nothing\n\n".as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.max_degree_node(), Err(QueryError::EmptyGraph));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Graph::load("/definitely/not/here.txt", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }
}
