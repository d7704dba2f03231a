//! Graph model for layout
//!
//! A graph is a fixed sequence of nodes (2D positions, identified by index)
//! and a fixed sequence of edges (index pairs). Topology is validated once at
//! construction and never changes afterwards; only node positions are mutable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::init::circular_positions;
use crate::render::Extent;

/// Errors raised while constructing a graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge references a node index outside `[0, node_count)`
    #[error("edge {edge} ({start} -> {end}) references a node outside 0..{node_count}")]
    InvalidTopology {
        edge: usize,
        start: usize,
        end: usize,
        node_count: usize,
    },

    /// Two distinct nodes share the same position
    #[error("nodes {first} and {second} are coincident")]
    DegenerateGeometry { first: usize, second: usize },

    /// More nodes than [`Graph::MAX_NODES`]
    #[error("{node_count} nodes exceeds the limit of {max}")]
    TooManyNodes { node_count: usize, max: usize },
}

/// A node position in the layout plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from this node to `other`
    pub fn angle_to(&self, other: &Node) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An edge between two nodes, by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Nodes with mutable positions plus an immutable edge list
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Largest node count accepted; every step is quadratic in it
    pub const MAX_NODES: usize = 100_000;

    /// Create a graph of `node_count` nodes seeded evenly on the unit circle
    ///
    /// The count and edges are checked before any position is allocated.
    /// Circular seeding never places two nodes on the same point, so there
    /// is no coincidence check.
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        validate_node_count(node_count)?;
        validate_topology(node_count, &edges)?;
        Ok(Self {
            nodes: circular_positions(node_count),
            edges,
        })
    }

    /// Create a graph from explicit positions
    ///
    /// Fails if any edge is out of range or if two nodes coincide, since
    /// coincident nodes have no defined repulsion direction.
    pub fn with_positions(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        validate_node_count(nodes.len())?;
        validate_topology(nodes.len(), &edges)?;
        validate_geometry(&nodes)?;
        Ok(Self { nodes, edges })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Positions are writable, but the slice cannot grow or shrink
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Bounding box of the current node positions
    pub fn extent(&self) -> Extent {
        Extent::of(&self.nodes)
    }
}

fn validate_node_count(node_count: usize) -> Result<(), GraphError> {
    if node_count > Graph::MAX_NODES {
        return Err(GraphError::TooManyNodes {
            node_count,
            max: Graph::MAX_NODES,
        });
    }
    Ok(())
}

fn validate_topology(node_count: usize, edges: &[Edge]) -> Result<(), GraphError> {
    for (index, edge) in edges.iter().enumerate() {
        if edge.start >= node_count || edge.end >= node_count {
            return Err(GraphError::InvalidTopology {
                edge: index,
                start: edge.start,
                end: edge.end,
                node_count,
            });
        }
    }
    Ok(())
}

fn validate_geometry(nodes: &[Node]) -> Result<(), GraphError> {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i] == nodes[j] {
                return Err(GraphError::DegenerateGeometry {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}
