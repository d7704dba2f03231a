//! Edge list reader
//!
//! Reads the plain-text graph description: the first line holds the node
//! count, every following line one edge as two whitespace-separated node
//! indices.
//!
//! ```text
//! 3
//! 0 1
//! 1 2
//! 2 0
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::graph::{Edge, Graph};
use crate::io::{IoError, IoResult, Reader};

/// Reader for plain-text edge lists
pub struct EdgeListReader;

impl EdgeListReader {
    /// Extension assumed for files that have none
    pub const DEFAULT_EXTENSION: &'static str = "txt";

    /// Create a new edge list reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for EdgeListReader {
    fn read(&self, input: &Path) -> IoResult<Graph> {
        let content = fs::read_to_string(input)?;
        let graph = parse_edge_list(&content)?;
        debug!(
            path = %input.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "read edge list"
        );
        Ok(graph)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "graph", "edges"]
    }
}

/// Parse an edge list, seeding node positions on the unit circle
///
/// Blank lines are ignored. Errors carry the 1-based line number.
pub fn parse_edge_list(content: &str) -> IoResult<Graph> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (count_line, count_text) = lines
        .next()
        .ok_or_else(|| IoError::Parse("missing node count".to_string()))?;
    let node_count = parse_index(count_line, count_text, "node count")?;
    if node_count > Graph::MAX_NODES {
        return Err(IoError::Parse(format!(
            "line {count_line}: node count {node_count} exceeds the limit of {}",
            Graph::MAX_NODES
        )));
    }

    let mut edges = Vec::new();
    for (line_number, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [start, end] = tokens.as_slice() else {
            return Err(IoError::Parse(format!(
                "line {line_number}: expected two node indices, found {}",
                tokens.len()
            )));
        };
        edges.push(Edge::new(
            parse_index(line_number, start, "edge start")?,
            parse_index(line_number, end, "edge end")?,
        ));
    }

    Ok(Graph::new(node_count, edges)?)
}

fn parse_index(line_number: usize, token: &str, what: &str) -> IoResult<usize> {
    token.parse().map_err(|_| {
        IoError::Parse(format!(
            "line {line_number}: {what} '{token}' is not a non-negative integer"
        ))
    })
}
