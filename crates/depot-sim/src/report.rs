//! Per-tick frames and the end-of-run report.

use depot_core::{
    ActuatorCommand, FaultEvent, SensorReading, Tick, VehicleId, VehicleState, VehicleStateChange,
};

// ── FrameResult ───────────────────────────────────────────────────────────────

/// Everything one tick produced, in emission order.
///
/// This is the record persistence and dashboard collaborators subscribe to;
/// the core holds no opinion on how it is stored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameResult {
    pub tick: Tick,
    pub readings: Vec<SensorReading>,
    pub commands: Vec<ActuatorCommand>,
    pub state_changes: Vec<VehicleStateChange>,
    pub faults: Vec<FaultEvent>,
}

// ── VehicleOutcome ────────────────────────────────────────────────────────────

/// Where one vehicle ended the run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleOutcome {
    pub vehicle: VehicleId,
    pub arrival: Tick,
    pub final_state: VehicleState,
    pub exited_at: Option<Tick>,
}

// ── SimulationReport ──────────────────────────────────────────────────────────

/// End-of-run (or halted-run) summary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// First tick that did not run — equals the number of completed ticks.
    pub final_tick: Tick,
    /// One entry per vehicle created so far, in exit-then-id order.
    pub outcomes: Vec<VehicleOutcome>,
    /// Every fault event raised during the run, in raise order.
    pub faults: Vec<FaultEvent>,
    /// Set when the run was aborted by a safety-invariant violation.
    pub invariant_violation: bool,
}

impl SimulationReport {
    /// True iff every created vehicle reached EXITED.
    pub fn all_exited(&self) -> bool {
        !self.outcomes.is_empty()
            && self.outcomes.iter().all(|o| o.final_state == VehicleState::Exited)
    }

    /// Largest detection latency across all fault events, if any were raised.
    pub fn max_fault_latency(&self) -> Option<u64> {
        self.faults.iter().map(|f| f.latency).max()
    }
}
