//! Single simulation step

use tracing::{debug, trace};

use crate::config::ForceConfig;
use crate::graph::Graph;
use crate::layout::forces::{DisplacementBuffer, apply_attraction, apply_repulsion};
use crate::render::Render;

/// Outcome of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Node pairs and edges skipped because their endpoints coincide
    pub degenerate_pairs: usize,
    /// Largest displacement applied to any node
    pub max_displacement: f64,
    /// Some node position is no longer finite
    pub diverged: bool,
}

/// Applies repulsion and attraction to a graph, one step at a time
#[derive(Debug, Clone)]
pub struct Integrator {
    config: ForceConfig,
    buffer: DisplacementBuffer,
}

impl Integrator {
    pub fn new(config: ForceConfig) -> Self {
        Self {
            config,
            buffer: DisplacementBuffer::default(),
        }
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Displacement applied by the most recent step
    pub fn last_displacement(&self) -> &DisplacementBuffer {
        &self.buffer
    }

    /// Advance every node by its accumulated force and redraw
    pub fn step<R: Render + ?Sized>(&mut self, graph: &mut Graph, renderer: &mut R) -> StepReport {
        self.buffer.reset(graph.node_count());

        let mut degenerate_pairs = apply_repulsion(graph.nodes(), self.config.k_repel, &mut self.buffer);
        degenerate_pairs += apply_attraction(
            graph.nodes(),
            graph.edges(),
            self.config.k_attract,
            &mut self.buffer,
        );

        let mut max_displacement: f64 = 0.0;
        for (index, (node, delta)) in graph
            .nodes_mut()
            .iter_mut()
            .zip(self.buffer.as_slice())
            .enumerate()
        {
            node.x += delta.dx;
            node.y += delta.dy;
            max_displacement = max_displacement.max(delta.magnitude());
            trace!(node = index, x = node.x, y = node.y, "node position");
        }

        let diverged = graph.nodes().iter().any(|n| !n.is_finite());
        if degenerate_pairs > 0 || diverged {
            debug!(degenerate_pairs, diverged, "irregular step");
        }

        renderer.draw(graph);

        StepReport {
            degenerate_pairs,
            max_displacement,
            diverged,
        }
    }
}
