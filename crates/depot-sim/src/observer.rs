//! Observer seam for per-tick output.
//!
//! The engine pushes each completed frame to an observer instead of writing
//! anywhere itself; persistence, dashboards, and test probes all plug in
//! here without touching the tick loop.

use crate::report::{FrameResult, SimulationReport};
use depot_core::Tick;

/// Receives lifecycle callbacks from a running simulation.
///
/// All methods default to no-ops, so implementors override only what they
/// care about.
pub trait SimObserver {
    /// Called before any phase of `tick` runs.
    fn on_tick_start(&mut self, tick: Tick) {
        let _ = tick;
    }

    /// Called with the completed frame at the end of every tick.
    fn on_frame(&mut self, frame: &FrameResult) {
        let _ = frame;
    }

    /// Called once after the last tick, with the final report.
    fn on_run_end(&mut self, report: &SimulationReport) {
        let _ = report;
    }
}

/// Observer that discards everything.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Observer that keeps a clone of every frame — trace comparison in tests,
/// replay tooling downstream.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames: Vec<FrameResult>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for FrameLog {
    fn on_frame(&mut self, frame: &FrameResult) {
        self.frames.push(frame.clone());
    }
}
