//! Initial node placement

use std::f64::consts::PI;

use crate::graph::Node;

/// Place `node_count` nodes evenly on the unit circle, node 0 at angle zero
pub fn circular_positions(node_count: usize) -> Vec<Node> {
    if node_count == 0 {
        return Vec::new();
    }

    let total = node_count as f64;
    (0..node_count)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / total;
            Node::new(angle.cos(), angle.sin())
        })
        .collect()
}
