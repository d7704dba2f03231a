//! SVG Writer
//!
//! Draws a finished layout as a standalone SVG image: edges as lines beneath
//! nodes drawn as circles. Layout coordinates are used directly as user units
//! (y flipped so that positive y points up) and the view box is fitted to the
//! node extent.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::graph::Graph;
use crate::io::{IoError, IoResult, Writer};
use crate::render::Extent;

/// Margin around the node extent, as a fraction of its larger side
const MARGIN_RATIO: f64 = 0.1;
/// Node radius, as a fraction of the larger side of the view box
const NODE_RADIUS_RATIO: f64 = 0.015;
/// Edge stroke width, as a fraction of the larger side of the view box
const STROKE_RATIO: f64 = 0.004;
/// Smallest side of the view box, so one or zero nodes still render
const MIN_SIDE: f64 = 1.0;

#[derive(Debug, Clone)]
struct LineData {
    x1: String,
    y1: String,
    x2: String,
    y2: String,
}

#[derive(Debug, Clone)]
struct CircleData {
    index: usize,
    cx: String,
    cy: String,
}

#[derive(Template)]
#[template(path = "layout.svg", escape = "none")]
struct LayoutTemplate<'a> {
    min_x: String,
    min_y: String,
    width: String,
    height: String,
    width_px: u32,
    height_px: u32,
    stroke_width: String,
    node_radius: String,
    lines: &'a [LineData],
    circles: &'a [CircleData],
}

/// Writer for SVG images of a layout
pub struct SvgWriter {
    /// Pixel size of the larger image side
    size_px: u32,
}

impl SvgWriter {
    pub const DEFAULT_SIZE_PX: u32 = 800;

    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_SIZE_PX)
    }

    pub fn with_size(size_px: u32) -> Self {
        Self { size_px }
    }

    /// Render the graph to an SVG document
    pub fn render(&self, graph: &Graph) -> IoResult<String> {
        let bounds = view_bounds(graph.extent());
        let side = bounds.width().max(bounds.height());
        let scale = f64::from(self.size_px) / side;

        let nodes = graph.nodes();
        let lines: Vec<LineData> = graph
            .edges()
            .iter()
            .filter(|edge| !edge.is_self_loop())
            .map(|edge| {
                let (start, end) = (nodes[edge.start], nodes[edge.end]);
                LineData {
                    x1: coord(start.x),
                    y1: coord(-start.y),
                    x2: coord(end.x),
                    y2: coord(-end.y),
                }
            })
            .collect();
        let circles: Vec<CircleData> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| CircleData {
                index,
                cx: coord(node.x),
                cy: coord(-node.y),
            })
            .collect();

        let template = LayoutTemplate {
            min_x: coord(bounds.min_x),
            min_y: coord(-bounds.max_y),
            width: coord(bounds.width()),
            height: coord(bounds.height()),
            width_px: (bounds.width() * scale).round() as u32,
            height_px: (bounds.height() * scale).round() as u32,
            stroke_width: coord(side * STROKE_RATIO),
            node_radius: coord(side * NODE_RADIUS_RATIO),
            lines: &lines,
            circles: &circles,
        };

        template.render().map_err(|e| IoError::Write(e.to_string()))
    }
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for SvgWriter {
    fn write(&self, graph: &Graph, output: &Path) -> IoResult<()> {
        let svg = self.render(graph)?;
        fs::write(output, svg).map_err(IoError::Io)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "svg"
    }
}

/// Extent padded by the margin and widened to at least [`MIN_SIDE`]
fn view_bounds(extent: Extent) -> Extent {
    let side = extent.width().max(extent.height());
    let padded = extent.padded(side * MARGIN_RATIO);

    let grow_x = (MIN_SIDE - padded.width()).max(0.0) / 2.0;
    let grow_y = (MIN_SIDE - padded.height()).max(0.0) / 2.0;
    Extent {
        min_x: padded.min_x - grow_x,
        min_y: padded.min_y - grow_y,
        max_x: padded.max_x + grow_x,
        max_y: padded.max_y + grow_y,
    }
}

fn coord(value: f64) -> String {
    format!("{:.4}", value)
}
