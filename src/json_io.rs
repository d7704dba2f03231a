//! JSON graph reader and layout writer
//!
//! Input is topology only (`node_count` plus index pairs); positions are
//! always seeded by the circular initializer. Output is a [`LayoutSnapshot`]
//! with the final position of every node.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, Graph};
use crate::io::{IoError, IoResult, Reader, Writer};

/// Topology-only graph description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub node_count: usize,
    #[serde(default)]
    pub edges: Vec<[usize; 2]>,
}

impl GraphDescription {
    pub fn into_graph(self) -> IoResult<Graph> {
        let edges = self
            .edges
            .into_iter()
            .map(|[start, end]| Edge::new(start, end))
            .collect();
        Ok(Graph::new(self.node_count, edges)?)
    }
}

/// A positioned node in the output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Final layout of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

impl LayoutSnapshot {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .enumerate()
                .map(|(index, node)| PositionedNode {
                    index,
                    x: node.x,
                    y: node.y,
                })
                .collect(),
            edges: graph.edges().to_vec(),
        }
    }
}

/// Reader for JSON graph descriptions
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> IoResult<Graph> {
        let content = fs::read_to_string(input)?;
        let description: GraphDescription =
            serde_json::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))?;
        description.into_graph()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Writer for JSON layout snapshots
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for JsonWriter {
    /// Fails on non-finite positions, which JSON has no number for
    fn write(&self, graph: &Graph, output: &Path) -> IoResult<()> {
        if let Some(index) = graph.nodes().iter().position(|n| !n.is_finite()) {
            return Err(IoError::Write(format!(
                "node {index} has a non-finite position"
            )));
        }
        let snapshot = LayoutSnapshot::from_graph(graph);

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| IoError::Write(format!("JSON serialization failed: {}", e)))?;

        fs::write(output, json).map_err(IoError::Io)?;

        Ok(())
    }

    fn format_id(&self) -> &str {
        "json"
    }
}
