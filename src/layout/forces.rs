//! Repulsion and attraction forces
//!
//! Both forces write into a [`DisplacementBuffer`] rather than moving nodes
//! directly, so every force in a step sees the same positions.

use crate::graph::{Edge, Node};

/// Accumulated displacement for one node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// One displacement accumulator per node
#[derive(Debug, Clone, Default)]
pub struct DisplacementBuffer {
    deltas: Vec<Displacement>,
}

impl DisplacementBuffer {
    pub fn new(node_count: usize) -> Self {
        Self {
            deltas: vec![Displacement::default(); node_count],
        }
    }

    /// Zero every accumulator, resizing to `node_count`
    pub fn reset(&mut self, node_count: usize) {
        self.deltas.clear();
        self.deltas.resize(node_count, Displacement::default());
    }

    pub fn get(&self, index: usize) -> Option<&Displacement> {
        self.deltas.get(index)
    }

    pub fn as_slice(&self) -> &[Displacement] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Push `a` by `(fx, fy)` and `b` by the opposite
    fn apply_pair(&mut self, a: usize, b: usize, fx: f64, fy: f64) {
        self.deltas[a].dx += fx;
        self.deltas[a].dy += fy;
        self.deltas[b].dx -= fx;
        self.deltas[b].dy -= fy;
    }
}

/// Repel every unordered pair of nodes with magnitude `k_repel / d`
///
/// Coincident pairs have no direction and are skipped. Returns how many
/// pairs were skipped.
pub fn apply_repulsion(nodes: &[Node], k_repel: f64, buffer: &mut DisplacementBuffer) -> usize {
    let n = nodes.len();
    let mut degenerate = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let distance = nodes[i].distance_to(&nodes[j]);
            if distance == 0.0 {
                degenerate += 1;
                continue;
            }

            let force = k_repel / distance;
            let (sin, cos) = nodes[i].angle_to(&nodes[j]).sin_cos();

            // i is pushed away from j, j away from i
            buffer.apply_pair(i, j, -force * cos, -force * sin);
        }
    }

    degenerate
}

/// Pull the endpoints of every edge together with magnitude `k_attract * d²`
///
/// Self-loops and edges whose endpoints coincide carry no force and are
/// skipped. Returns how many edges were skipped.
pub fn apply_attraction(
    nodes: &[Node],
    edges: &[Edge],
    k_attract: f64,
    buffer: &mut DisplacementBuffer,
) -> usize {
    let mut degenerate = 0;

    for edge in edges {
        let (start, end) = (&nodes[edge.start], &nodes[edge.end]);
        let distance = start.distance_to(end);
        if edge.is_self_loop() || distance == 0.0 {
            degenerate += 1;
            continue;
        }

        let force = k_attract * distance * distance;
        let (sin, cos) = start.angle_to(end).sin_cos();

        buffer.apply_pair(edge.start, edge.end, force * cos, force * sin);
    }

    degenerate
}
