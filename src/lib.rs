//! forcelayout - force-directed 2D layout for arbitrary graphs.
//!
//! Nodes start evenly spaced on the unit circle; every step all node pairs
//! repel, edge endpoints attract, and positions move by the summed
//! displacement. A scheduler repeats steps until a wall-clock budget runs out.
//!
//! ```no_run
//! use forcelayout::config::LayoutConfig;
//! use forcelayout::graph::{Edge, Graph};
//! use forcelayout::layout::{Integrator, Scheduler};
//! use forcelayout::render::NullRenderer;
//!
//! let config = LayoutConfig::default();
//! let mut graph = Graph::new(3, vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 0)])?;
//! let mut scheduler = Scheduler::with_system_clock(Integrator::new(config.forces), config.run);
//! let summary = scheduler.run(&mut graph, &mut NullRenderer);
//! println!("{} steps", summary.steps);
//! # Ok::<(), forcelayout::graph::GraphError>(())
//! ```

pub mod config;
pub mod edge_list_reader;
pub mod graph;
pub mod io;
pub mod json_io;
pub mod layout;
pub mod prompt;
pub mod render;
pub mod svg_writer;
