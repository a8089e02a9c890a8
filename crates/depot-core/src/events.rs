//! Event records flowing through the per-tick output stream.
//!
//! These are plain data types: the core produces them in a fixed order every
//! tick and downstream collaborators (persistence, dashboards, report
//! renderers) consume them through the simulation observer.  The core never
//! depends on how — or whether — they are stored.

use crate::ids::{Device, VehicleId};
use crate::status::{ChargerHealth, FaultKind, GateStatus, VehicleState};
use crate::time::Tick;

// ── SensorValue ───────────────────────────────────────────────────────────────

/// The value carried by one sensor reading — one variant per device kind.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorValue {
    /// Reported gate position.
    Gate(GateStatus),
    /// Reported spot occupancy.
    Occupancy(bool),
    /// Reported charger health.
    Charger(ChargerHealth),
}

impl SensorValue {
    /// The value a noise-corrupted sensor reports instead of `self`.
    ///
    /// Noise flips a boolean/state reading; it never changes the variant.
    #[inline]
    pub fn flipped(self) -> SensorValue {
        match self {
            SensorValue::Gate(s) => SensorValue::Gate(s.flipped()),
            SensorValue::Occupancy(o) => SensorValue::Occupancy(!o),
            SensorValue::Charger(h) => SensorValue::Charger(h.flipped()),
        }
    }
}

// ── SensorReading ─────────────────────────────────────────────────────────────

/// One sensor sample: ground truth plus the (possibly corrupted) reported
/// value.
///
/// `ground_truth` is carried for fault-latency accounting and diagnostics;
/// control logic must only ever act on `reported` or on its own bookkeeping.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    pub tick: Tick,
    pub target: Device,
    pub ground_truth: SensorValue,
    pub reported: SensorValue,
    /// `true` iff `reported != ground_truth` (the sample was corrupted).
    pub noisy: bool,
}

// ── ActuatorCommand ───────────────────────────────────────────────────────────

/// Commands the controller can issue to a device.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    OpenGate,
    CloseGate,
    /// Engage a charger for the given vehicle.
    StartCharge(VehicleId),
    StopCharge,
}

/// A command issued to one device on one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActuatorCommand {
    pub tick: Tick,
    pub target: Device,
    pub command: Command,
}

// ── FaultEvent ────────────────────────────────────────────────────────────────

/// A detected persistent hardware fault.
///
/// Edge-triggered: raised once on first detection, not re-fired while the
/// condition persists.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaultEvent {
    /// Tick at which the detector raised the event.
    pub raised_at: Tick,
    pub target: Device,
    pub kind: FaultKind,
    /// Ticks between ground-truth fault onset and `raised_at`.
    pub latency: u64,
}

// ── VehicleStateChange ────────────────────────────────────────────────────────

/// A single vehicle state-machine transition.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleStateChange {
    pub tick: Tick,
    pub vehicle: VehicleId,
    pub from: VehicleState,
    pub to: VehicleState,
}
