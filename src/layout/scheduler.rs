//! Time-bounded simulation driver
//!
//! The scheduler owns no thread and never sleeps. Hosts call
//! [`Scheduler::advance`] themselves (from a tight loop, a timer, or a test),
//! or use [`Scheduler::run`] to spin until the wall-clock budget is spent.

use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::graph::Graph;
use crate::layout::integrator::{Integrator, StepReport};
use crate::render::Render;

/// Monotonic time source in seconds
pub trait Clock {
    fn now_seconds(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_seconds(&self) -> f64 {
        (**self).now_seconds()
    }
}

/// Wall-clock time measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and hosts that own their own timeline
///
/// Optionally advances by a fixed tick every time it is read.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
    tick: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that moves forward by `tick` seconds after every read
    pub fn ticking(tick: f64) -> Self {
        Self {
            now: Cell::new(0.0),
            tick,
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }
}

/// Lifecycle of one run. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    NotStarted,
    Running,
    Finished,
}

/// Result of asking the scheduler for one more step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepResult {
    Stepped(StepReport),
    Finished,
}

/// Totals for a completed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub elapsed_seconds: f64,
    /// Steps that skipped at least one coincident pair
    pub degenerate_steps: u64,
    /// Positions became non-finite at some point during the run
    pub diverged: bool,
}

/// Drives an [`Integrator`] until its time (or step) budget is exhausted
#[derive(Debug)]
pub struct Scheduler<C: Clock = SystemClock> {
    integrator: Integrator,
    budget: RunConfig,
    clock: C,
    state: SchedulerState,
    started_at: f64,
    steps: u64,
    degenerate_steps: u64,
    diverged: bool,
}

impl Scheduler<SystemClock> {
    /// Scheduler backed by the platform clock
    pub fn with_system_clock(integrator: Integrator, budget: RunConfig) -> Self {
        Self::new(integrator, budget, SystemClock::new())
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn new(integrator: Integrator, budget: RunConfig, clock: C) -> Self {
        Self {
            integrator,
            budget,
            clock,
            state: SchedulerState::NotStarted,
            started_at: 0.0,
            steps: 0,
            degenerate_steps: 0,
            diverged: false,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    /// Seconds since the run started (zero before the first advance)
    pub fn elapsed_seconds(&self) -> f64 {
        match self.state {
            SchedulerState::NotStarted => 0.0,
            _ => self.clock.now_seconds() - self.started_at,
        }
    }

    /// Run one step if the budget allows, otherwise finish
    ///
    /// The first call starts the run: it records the start time and
    /// initializes the renderer's surface to the graph's current extent.
    pub fn advance<R: Render + ?Sized>(&mut self, graph: &mut Graph, renderer: &mut R) -> StepResult {
        match self.state {
            SchedulerState::Finished => return StepResult::Finished,
            SchedulerState::NotStarted => {
                self.started_at = self.clock.now_seconds();
                self.state = SchedulerState::Running;
                renderer.init(graph.extent());
                debug!(
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    duration = self.budget.duration_seconds,
                    "simulation started"
                );
            }
            SchedulerState::Running => {}
        }

        let elapsed = self.clock.now_seconds() - self.started_at;
        if !self.within_budget(elapsed) {
            self.state = SchedulerState::Finished;
            debug!(steps = self.steps, elapsed, "simulation finished");
            return StepResult::Finished;
        }

        let report = self.integrator.step(graph, renderer);
        self.steps += 1;
        self.note_irregularities(&report);
        StepResult::Stepped(report)
    }

    /// Step until the budget is spent
    pub fn run<R: Render + ?Sized>(&mut self, graph: &mut Graph, renderer: &mut R) -> RunSummary {
        while let StepResult::Stepped(_) = self.advance(graph, renderer) {}

        RunSummary {
            steps: self.steps,
            elapsed_seconds: self.elapsed_seconds(),
            degenerate_steps: self.degenerate_steps,
            diverged: self.diverged,
        }
    }

    /// Warn on the first degenerate or diverged step of a run only
    fn note_irregularities(&mut self, report: &StepReport) {
        if report.degenerate_pairs > 0 {
            if self.degenerate_steps == 0 {
                warn!(
                    step = self.steps,
                    degenerate_pairs = report.degenerate_pairs,
                    "skipping coincident node pairs"
                );
            }
            self.degenerate_steps += 1;
        }
        if report.diverged && !self.diverged {
            warn!(
                step = self.steps,
                "layout diverged: node positions are no longer finite"
            );
            self.diverged = true;
        }
    }

    fn within_budget(&self, elapsed: f64) -> bool {
        let duration = self.budget.duration_seconds;
        if let Some(max_steps) = self.budget.max_steps {
            if self.steps >= max_steps {
                return false;
            }
        }
        // A zero budget still allows the step started at time zero, and only that one.
        if duration == 0.0 && self.steps > 0 {
            return false;
        }
        elapsed <= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForceConfig;
    use crate::graph::{Edge, Node};
    use crate::render::{NullRenderer, SnapshotRenderer};

    fn scheduler<'a>(
        duration_seconds: f64,
        max_steps: Option<u64>,
        clock: &'a ManualClock,
    ) -> Scheduler<&'a ManualClock> {
        Scheduler::new(
            Integrator::new(ForceConfig::default()),
            RunConfig {
                duration_seconds,
                max_steps,
            },
            clock,
        )
    }

    fn path_graph() -> Graph {
        Graph::new(3, vec![Edge::new(0, 1), Edge::new(1, 2)]).unwrap()
    }

    #[test]
    fn starts_not_started() {
        let clock = ManualClock::new();
        let sched = scheduler(1.0, None, &clock);

        assert_eq!(sched.state(), SchedulerState::NotStarted);
        assert_eq!(sched.steps(), 0);
    }

    #[test]
    fn zero_duration_runs_at_most_one_step() {
        let clock = ManualClock::new();
        let mut sched = scheduler(0.0, None, &clock);
        let mut graph = path_graph();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert_eq!(summary.steps, 1);
        assert_eq!(sched.state(), SchedulerState::Finished);
    }

    #[test]
    fn zero_duration_with_real_clock_terminates() {
        let mut sched = Scheduler::with_system_clock(
            Integrator::new(ForceConfig::default()),
            RunConfig {
                duration_seconds: 0.0,
                max_steps: None,
            },
        );
        let mut graph = path_graph();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert!(summary.steps <= 1);
    }

    #[test]
    fn negative_duration_runs_no_steps() {
        let clock = ManualClock::new();
        let mut sched = scheduler(-1.0, None, &clock);
        let mut graph = path_graph();
        let before = graph.clone();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert_eq!(summary.steps, 0);
        assert_eq!(graph, before);
        assert_eq!(sched.state(), SchedulerState::Finished);
    }

    #[test]
    fn steps_while_time_remains() {
        let clock = ManualClock::new();
        let mut sched = scheduler(1.0, None, &clock);
        let mut graph = path_graph();

        assert!(matches!(sched.advance(&mut graph, &mut NullRenderer), StepResult::Stepped(_)));
        assert_eq!(sched.state(), SchedulerState::Running);

        clock.advance(1.0);
        assert!(matches!(sched.advance(&mut graph, &mut NullRenderer), StepResult::Stepped(_)));

        clock.advance(0.001);
        assert_eq!(sched.advance(&mut graph, &mut NullRenderer), StepResult::Finished);
        assert_eq!(sched.steps(), 2);
    }

    #[test]
    fn finished_is_terminal() {
        let clock = ManualClock::new();
        let mut sched = scheduler(0.5, None, &clock);
        let mut graph = path_graph();

        clock.set(10.0);
        sched.advance(&mut graph, &mut NullRenderer);
        clock.advance(5.0);
        sched.advance(&mut graph, &mut NullRenderer);
        clock.set(0.0);

        assert_eq!(sched.advance(&mut graph, &mut NullRenderer), StepResult::Finished);
        assert_eq!(sched.state(), SchedulerState::Finished);
    }

    #[test]
    fn run_stops_when_clock_passes_budget() {
        let clock = ManualClock::ticking(0.1);
        let mut sched = scheduler(1.0, None, &clock);
        let mut graph = path_graph();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert!(summary.steps > 0);
        assert!(summary.elapsed_seconds > 1.0);
        assert_eq!(sched.state(), SchedulerState::Finished);
    }

    #[test]
    fn max_steps_caps_the_run() {
        let clock = ManualClock::new();
        let mut sched = scheduler(60.0, Some(25), &clock);
        let mut graph = path_graph();
        let mut renderer = SnapshotRenderer::default();

        let summary = sched.run(&mut graph, &mut renderer);

        assert_eq!(summary.steps, 25);
        assert_eq!(renderer.frames(), 25);
    }

    #[test]
    fn first_advance_initializes_renderer() {
        let clock = ManualClock::new();
        let mut sched = scheduler(-1.0, None, &clock);
        let mut graph = path_graph();
        let mut renderer = SnapshotRenderer::default();

        sched.advance(&mut graph, &mut renderer);

        assert_eq!(renderer.surface(), Some(graph.extent()));
        assert_eq!(renderer.frames(), 0);
    }

    #[test]
    fn coincident_steps_are_counted_across_the_run() {
        let clock = ManualClock::new();
        let mut sched = scheduler(60.0, Some(5), &clock);
        let mut graph = Graph::new(3, vec![Edge::new(0, 1)]).unwrap();
        let shared = Node::new(0.25, 0.25);
        graph.nodes_mut()[0] = shared;
        graph.nodes_mut()[1] = shared;

        let summary = sched.run(&mut graph, &mut NullRenderer);

        // the pair is pushed identically every step, so it never separates
        assert_eq!(summary.steps, 5);
        assert_eq!(summary.degenerate_steps, 5);
        assert!(!summary.diverged);
    }

    #[test]
    fn divergence_is_recorded_once_and_kept() {
        let clock = ManualClock::new();
        let mut sched = Scheduler::new(
            Integrator::new(ForceConfig {
                k_repel: 1e10,
                k_attract: 0.0,
            }),
            RunConfig {
                duration_seconds: 60.0,
                max_steps: Some(3),
            },
            &clock,
        );
        let mut graph =
            Graph::with_positions(vec![Node::new(0.0, 0.0), Node::new(1e-300, 0.0)], vec![])
                .unwrap();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert_eq!(summary.steps, 3);
        assert!(summary.diverged);
    }

    #[test]
    fn regular_run_reports_no_irregularities() {
        let clock = ManualClock::new();
        let mut sched = scheduler(60.0, Some(10), &clock);
        let mut graph = path_graph();

        let summary = sched.run(&mut graph, &mut NullRenderer);

        assert_eq!(summary.degenerate_steps, 0);
        assert!(!summary.diverged);
    }
}
