//! Plain-text edge-list parsing
//!
//! # Format
//!
//! ```text
//! # comment
//! 0 1
//! 0 2
//!
//! 1 3
//! ```
//!
//! One edge per line, two whitespace-separated non-negative integers. Blank
//! lines and lines starting with the comment marker are skipped. There is
//! no header.

use super::NodeId;
use crate::error::LoadError;
use std::io::BufRead;
use std::num::IntErrorKind;
use std::path::PathBuf;

/// Default comment marker
pub const DEFAULT_COMMENT_PREFIX: char = '#';

/// Lazy `(u, v)` reader over any buffered source
///
/// Yields `Err` at most once: iteration stops after the first failure.
///
/// # Example
///
/// ```
/// use edgescope::{EdgeListReader, NodeId};
///
/// let text = "# tiny\n0 1\n\n2 0\n";
/// let edges: Vec<_> = EdgeListReader::new(text.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(edges, vec![(NodeId(0), NodeId(1)), (NodeId(2), NodeId(0))]);
/// ```
#[derive(Debug)]
pub struct EdgeListReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    comment_prefix: char,
    max_id: Option<u32>,
    /// Reported in I/O errors
    source_name: PathBuf,
    failed: bool,
}

impl<R: BufRead> EdgeListReader<R> {
    /// Wrap a buffered source using the default `#` comment marker
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
            comment_prefix: DEFAULT_COMMENT_PREFIX,
            max_id: None,
            source_name: PathBuf::from("<reader>"),
            failed: false,
        }
    }

    /// Updates the comment marker
    #[must_use]
    pub fn comment_prefix(mut self, prefix: char) -> Self {
        self.comment_prefix = prefix;
        self
    }

    /// Name used for the source in I/O errors
    #[must_use]
    pub fn source_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Largest node id yielded so far
    #[must_use]
    pub const fn max_id(&self) -> Option<u32> {
        self.max_id
    }

    /// 1-based number of the last line read
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    fn next_edge(&mut self) -> Result<Option<(NodeId, NodeId)>, LoadError> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| LoadError::io(self.source_name.clone(), e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            // Undecodable bytes are a malformed line, not an unreadable source
            let line = std::str::from_utf8(&self.buf)
                .map_err(|_| LoadError::Parse {
                    line: self.line_number,
                    content: String::from_utf8_lossy(&self.buf).trim().to_string(),
                    reason: "line is not valid UTF-8".to_string(),
                })?
                .trim();
            if line.is_empty() || line.starts_with(self.comment_prefix) {
                continue;
            }

            let (u, v) = parse_edge_line(line).map_err(|reason| LoadError::Parse {
                line: self.line_number,
                content: line.to_string(),
                reason,
            })?;

            let highest = u.max(v);
            self.max_id = Some(self.max_id.map_or(highest, |m| m.max(highest)));
            return Ok(Some((NodeId(u), NodeId(v))));
        }
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = Result<(NodeId, NodeId), LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_edge() {
            Ok(edge) => edge.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse one trimmed, non-comment line into an id pair
fn parse_edge_line(line: &str) -> Result<(u32, u32), String> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(u), Some(v), None) => Ok((parse_node_id(u)?, parse_node_id(v)?)),
        _ => Err(format!(
            "expected 2 node ids, found {}",
            line.split_whitespace().count()
        )),
    }
}

fn parse_node_id(token: &str) -> Result<u32, String> {
    token.parse::<u32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => format!("node id `{token}` exceeds {}", u32::MAX),
        _ if token.len() > 1
            && token.starts_with('-')
            && token[1..].bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("negative node id `{token}`")
        }
        _ => format!("invalid node id `{token}`"),
    })
}
