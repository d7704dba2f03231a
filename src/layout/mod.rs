//! Force-directed layout simulation
//!
//! Nodes start evenly spaced on the unit circle. Each step every pair of nodes
//! repels with a force inversely proportional to distance, every edge attracts
//! its endpoints with a force proportional to squared distance, and the summed
//! displacement is added straight onto each position (explicit Euler, no
//! velocity, no damping).
//!
//! There is no step-size control. Large graphs or extreme force ratios can
//! oscillate or diverge; the integrator reports the largest displacement of
//! each step so hosts can watch for it.

pub mod forces;
pub mod init;
pub mod integrator;
pub mod scheduler;

pub use forces::{Displacement, DisplacementBuffer};
pub use init::circular_positions;
pub use integrator::{Integrator, StepReport};
pub use scheduler::{
    Clock, ManualClock, RunSummary, Scheduler, SchedulerState, StepResult, SystemClock,
};
