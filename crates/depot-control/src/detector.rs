//! Sliding-window fault detector.
//!
//! One generic device-anomaly mechanism serves both fault kinds: a monitored
//! device (gate or charger) keeps a bounded window of the last
//! [`VOTE_WINDOW`] ticks recording whether the reported value disagreed with
//! the expected one.  A `FaultEvent` is raised when at least
//! [`VOTE_THRESHOLD`] samples in the window disagree *and* the current
//! sample disagrees — a majority vote over a sustained span, never a single
//! anomalous reading.
//!
//! That vote is what separates the two failure modes the simulator models:
//!
//! - sensor noise is independent per tick, so isolated flips cannot
//!   assemble a majority;
//! - a genuine fault disagrees every tick from onset, so with clean status
//!   channels the third post-onset sample trips the vote — detection
//!   latency 2, comfortably inside the 5-tick bound.
//!
//! # Expected values and the one-tick sensor lag
//!
//! Sensors are sampled at the top of a tick, before that tick's commands are
//! applied, so a reading reflects the device state after the *previous*
//! tick.  Each monitor therefore votes against the expectation that was in
//! force when the reading was taken (last tick's commanded position for
//! gates; `Ok` for chargers, which are always expected healthy).  A healthy
//! gate can then never produce a disagreement, no matter how often the
//! controller cycles it.
//!
//! Detection is edge-triggered per device: one event on first detection,
//! nothing while the condition persists.  Recovery is not modeled.

use std::collections::VecDeque;

use depot_core::{
    ChargerHealth, Device, FaultEvent, FaultKind, GateStatus, SensorReading, SensorValue, Tick,
};
use depot_model::Depot;

/// Window length, in ticks, of per-device reading history.
pub const VOTE_WINDOW: usize = 5;

/// Disagreeing samples within the window needed to raise a fault.
pub const VOTE_THRESHOLD: usize = 3;

// ── Per-device monitor ────────────────────────────────────────────────────────

/// Vote state for one monitored device.
#[derive(Clone, Debug, Default)]
struct Monitor {
    /// Last `VOTE_WINDOW` disagreement flags, oldest first.
    window: VecDeque<bool>,
    /// Edge-trigger latch: set once a fault has been raised.
    latched: bool,
}

impl Monitor {
    /// Push this tick's disagreement flag; `true` if the vote now passes.
    fn vote(&mut self, disagrees: bool) -> bool {
        if self.window.len() == VOTE_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(disagrees);
        disagrees && self.window.iter().filter(|&&d| d).count() >= VOTE_THRESHOLD
    }
}

// ── FaultDetector ─────────────────────────────────────────────────────────────

/// Analyzes each tick's readings against expected device behavior.
///
/// Spots are not monitored: occupancy has no persistent-fault mode, and its
/// noise is the allocator's problem to ignore, not the detector's to flag.
#[derive(Clone, Debug)]
pub struct FaultDetector {
    gates: Vec<Monitor>,
    /// Commanded gate position in force when the next reading was taken.
    gate_expected: Vec<GateStatus>,
    chargers: Vec<Monitor>,
}

impl FaultDetector {
    pub fn new(gate_count: usize, charger_count: usize) -> Self {
        Self {
            gates: vec![Monitor::default(); gate_count],
            gate_expected: vec![GateStatus::default(); gate_count],
            chargers: vec![Monitor::default(); charger_count],
        }
    }

    /// Feed one tick's readings; returns newly raised fault events in
    /// device order.
    ///
    /// `depot` supplies the commanded values for next tick's expectations
    /// and the ground-truth onset ticks for latency accounting.
    pub fn scan(&mut self, tick: Tick, depot: &Depot, readings: &[SensorReading]) -> Vec<FaultEvent> {
        let mut events = Vec::new();

        for reading in readings {
            match (reading.target, reading.reported) {
                (Device::Gate(id), SensorValue::Gate(reported)) => {
                    let expected = self.gate_expected[id.index()];
                    // Expectation for next tick's reading: what is commanded now.
                    self.gate_expected[id.index()] = depot.gate(id).commanded;

                    let monitor = &mut self.gates[id.index()];
                    if monitor.latched {
                        continue;
                    }
                    if monitor.vote(reported != expected) {
                        monitor.latched = true;
                        let onset = depot.gate(id).stuck_since.unwrap_or(tick);
                        events.push(FaultEvent {
                            raised_at: tick,
                            target: reading.target,
                            kind: FaultKind::GateStuck,
                            latency: tick.since(onset),
                        });
                    }
                }
                (Device::Charger(id), SensorValue::Charger(reported)) => {
                    let monitor = &mut self.chargers[id.index()];
                    if monitor.latched {
                        continue;
                    }
                    if monitor.vote(reported != ChargerHealth::Ok) {
                        monitor.latched = true;
                        let onset = depot.charger(id).failed_since.unwrap_or(tick);
                        events.push(FaultEvent {
                            raised_at: tick,
                            target: reading.target,
                            kind: FaultKind::ChargerFailure,
                            latency: tick.since(onset),
                        });
                    }
                }
                // Occupancy readings carry no fault mode.
                _ => {}
            }
        }

        events
    }
}
