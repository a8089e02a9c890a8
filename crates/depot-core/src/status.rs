//! Closed status enums shared across the workspace.

use std::fmt;

// ── GateStatus ────────────────────────────────────────────────────────────────

/// Position of a gate.
///
/// STUCK is deliberately not a variant here: a stuck gate still *has* a
/// position — the fault is that commanded and actual position diverge, which
/// the gate's state record tracks separately and the fault detector infers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateStatus {
    Open,
    #[default]
    Closed,
}

impl GateStatus {
    /// The opposite position — what a noise-corrupted sensor reports.
    #[inline]
    pub fn flipped(self) -> GateStatus {
        match self {
            GateStatus::Open => GateStatus::Closed,
            GateStatus::Closed => GateStatus::Open,
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateStatus::Open => write!(f, "open"),
            GateStatus::Closed => write!(f, "closed"),
        }
    }
}

// ── ChargerHealth ─────────────────────────────────────────────────────────────

/// Ground-truth health of a charger.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargerHealth {
    #[default]
    Ok,
    Failed,
}

impl ChargerHealth {
    #[inline]
    pub fn flipped(self) -> ChargerHealth {
        match self {
            ChargerHealth::Ok => ChargerHealth::Failed,
            ChargerHealth::Failed => ChargerHealth::Ok,
        }
    }
}

impl fmt::Display for ChargerHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargerHealth::Ok => write!(f, "ok"),
            ChargerHealth::Failed => write!(f, "failed"),
        }
    }
}

// ── VehicleState ──────────────────────────────────────────────────────────────

/// Lifecycle state of a vehicle.
///
/// Normal path: `Arriving → Queued → Assigned → Charging → Departing →
/// Exited`.  Side path on charger fault: `Charging → Waiting → Assigned`
/// (the vehicle is re-queued with its original arrival priority, not
/// discarded).
///
/// A vehicle may hold spot/charger references only in `Assigned` and
/// `Charging`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    Arriving,
    Queued,
    Assigned,
    Charging,
    Waiting,
    Departing,
    Exited,
}

impl VehicleState {
    /// States in which the vehicle may hold resource references.
    #[inline]
    pub fn may_hold_resources(self) -> bool {
        matches!(self, VehicleState::Assigned | VehicleState::Charging)
    }

    /// Terminal state — the vehicle is removed from the active set.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == VehicleState::Exited
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleState::Arriving => "arriving",
            VehicleState::Queued => "queued",
            VehicleState::Assigned => "assigned",
            VehicleState::Charging => "charging",
            VehicleState::Waiting => "waiting",
            VehicleState::Departing => "departing",
            VehicleState::Exited => "exited",
        };
        f.write_str(s)
    }
}

// ── FaultKind ─────────────────────────────────────────────────────────────────

/// Kinds of persistent ground-truth hardware faults the detector can raise.
///
/// Sensor noise is not a fault kind: noise is memoryless corruption of a
/// single reading and is filtered out by the detector's vote window.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultKind {
    ChargerFailure,
    GateStuck,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::ChargerFailure => write!(f, "charger_failure"),
            FaultKind::GateStuck => write!(f, "gate_stuck"),
        }
    }
}
