//! Render collaborators
//!
//! The simulation tells a renderer two things: the size of the surface to
//! prepare (once, before the first step) and the graph to redraw (after every
//! step). Both calls are fire-and-forget.

use tracing::trace;

use crate::graph::{Graph, Node};

/// Axis-aligned bounding box of node positions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounding box of `nodes`; the zero extent when there are none
    pub fn of(nodes: &[Node]) -> Self {
        let Some(first) = nodes.first() else {
            return Self::default();
        };

        nodes.iter().skip(1).fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |acc, node| Self {
                min_x: acc.min_x.min(node.x),
                min_y: acc.min_y.min(node.y),
                max_x: acc.max_x.max(node.x),
                max_y: acc.max_y.max(node.y),
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the box by `margin` on every side
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Something that displays the layout as it evolves
pub trait Render {
    /// Prepare a surface large enough for `extent`
    fn init(&mut self, extent: Extent);

    /// Redraw the current node positions and edges
    fn draw(&mut self, graph: &Graph);
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Render for NullRenderer {
    fn init(&mut self, _extent: Extent) {}

    fn draw(&mut self, _graph: &Graph) {}
}

/// Logs every node position each frame at trace level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRenderer {
    frame: u64,
}

impl Render for TracingRenderer {
    fn init(&mut self, extent: Extent) {
        self.frame = 0;
        trace!(
            width = extent.width(),
            height = extent.height(),
            "render surface initialized"
        );
    }

    fn draw(&mut self, graph: &Graph) {
        self.frame += 1;
        for (index, node) in graph.nodes().iter().enumerate() {
            trace!(frame = self.frame, node = index, x = node.x, y = node.y, "draw");
        }
    }
}

/// Keeps the latest frame for later output
#[derive(Debug, Clone, Default)]
pub struct SnapshotRenderer {
    surface: Option<Extent>,
    positions: Vec<Node>,
    frames: u64,
}

impl SnapshotRenderer {
    /// Extent passed to `init`, if it has been called
    pub fn surface(&self) -> Option<Extent> {
        self.surface
    }

    /// Node positions from the most recent frame
    pub fn positions(&self) -> &[Node] {
        &self.positions
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Render for SnapshotRenderer {
    fn init(&mut self, extent: Extent) {
        self.surface = Some(extent);
        self.positions.clear();
        self.frames = 0;
    }

    fn draw(&mut self, graph: &Graph) {
        self.positions.clear();
        self.positions.extend_from_slice(graph.nodes());
        self.frames += 1;
    }
}

/// Fan one frame out to two renderers
impl<A: Render, B: Render> Render for (A, B) {
    fn init(&mut self, extent: Extent) {
        self.0.init(extent);
        self.1.init(extent);
    }

    fn draw(&mut self, graph: &Graph) {
        self.0.draw(graph);
        self.1.draw(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[test]
    fn extent_of_empty_is_zero() {
        let extent = Extent::of(&[]);

        assert_eq!(extent, Extent::default());
        assert_eq!(extent.width(), 0.0);
    }

    #[test]
    fn extent_bounds_all_nodes() {
        let nodes = [Node::new(-2.0, 1.0), Node::new(3.0, -4.0), Node::new(0.5, 0.5)];
        let extent = Extent::of(&nodes);

        assert_eq!(
            extent,
            Extent {
                min_x: -2.0,
                min_y: -4.0,
                max_x: 3.0,
                max_y: 1.0,
            }
        );
        assert_eq!(extent.width(), 5.0);
        assert_eq!(extent.height(), 5.0);
        assert_eq!(extent.padded(1.0).width(), 7.0);
    }

    #[test]
    fn snapshot_keeps_latest_frame() {
        let mut graph = Graph::new(2, vec![Edge::new(0, 1)]).unwrap();
        let mut renderer = SnapshotRenderer::default();

        renderer.init(graph.extent());
        renderer.draw(&graph);
        graph.nodes_mut()[0].x = 9.0;
        renderer.draw(&graph);

        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.positions()[0].x, 9.0);
        assert_eq!(renderer.surface().map(|e| e.max_x), Some(1.0));
    }

    #[test]
    fn pair_forwards_to_both() {
        let graph = Graph::new(3, vec![]).unwrap();
        let mut pair = (TracingRenderer::default(), SnapshotRenderer::default());

        pair.init(graph.extent());
        pair.draw(&graph);

        assert_eq!(pair.0.frame, 1);
        assert_eq!(pair.1.frames(), 1);
    }
}
