//! Scenario configuration and validation.
//!
//! A `ScenarioConfig` fully determines a run: topology counts, the vehicle
//! arrival schedule, noise probabilities, the fault-injection schedule, and
//! the master RNG seed.  Identical configs always produce identical
//! tick-by-tick traces.
//!
//! Validation happens before any tick runs; a bad scenario fails with
//! [`ConfigError`] and is user-recoverable by fixing the input.

use thiserror::Error;

use crate::ids::{ChargerId, Device, GateId, SpotId};
use crate::status::FaultKind;
use crate::time::Tick;

// ── ConfigError ───────────────────────────────────────────────────────────────

/// Invalid scenario parameters.  Raised by [`ScenarioConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{what} count must be positive")]
    NonPositiveCount { what: &'static str },

    #[error("{channel} noise probability {value} outside [0, 1]")]
    NoiseOutOfRange { channel: &'static str, value: f64 },

    #[error("charge duration must be at least one tick")]
    ZeroChargeDuration,

    #[error("scheduled fault at {tick} targets nonexistent device {target}")]
    UnknownFaultTarget { tick: Tick, target: Device },

    #[error("scheduled fault at {tick}: {kind} cannot occur on {target}")]
    FaultKindMismatch {
        tick: Tick,
        target: Device,
        kind: FaultKind,
    },
}

// ── NoiseProfile ──────────────────────────────────────────────────────────────

/// Independent per-channel sensor noise probabilities.
///
/// Each reading is corrupted (flipped) with the channel's probability,
/// independently per tick — noise is stateless and memoryless.  The split
/// per device kind follows the original depot hardware, where occupancy
/// sensors are far noisier than gate or charger status feeds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseProfile {
    pub gate: f64,
    pub occupancy: f64,
    pub charger: f64,
}

impl NoiseProfile {
    /// No corruption on any channel.
    pub const CLEAN: NoiseProfile = NoiseProfile { gate: 0.0, occupancy: 0.0, charger: 0.0 };

    /// The same flip probability on every channel.
    pub fn uniform(p: f64) -> Self {
        Self { gate: p, occupancy: p, charger: p }
    }
}

// ── FaultInjection ────────────────────────────────────────────────────────────

/// One scheduled ground-truth fault: at `tick`, `target` begins to
/// malfunction persistently.  Distinct from noise — the fault is real and
/// lasts for the rest of the run (no auto-recovery is modeled).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaultInjection {
    pub tick: Tick,
    pub target: Device,
    pub kind: FaultKind,
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Everything needed to reproduce a run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    /// Number of gates.  Gate 0 is the entry gate; the highest-id gate is
    /// the exit gate (the same gate serves both roles in a 1-gate depot).
    pub gates: u16,
    pub spots: u16,
    pub chargers: u16,

    /// Arrival tick for each vehicle; `VehicleId`s are assigned in schedule
    /// order.  Need not be sorted.
    pub arrivals: Vec<u64>,

    /// Ticks a vehicle must spend CHARGING before it may depart.
    pub charge_duration_ticks: u64,

    pub noise: NoiseProfile,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Scheduled ground-truth faults, applied at the start of their tick.
    pub faults: Vec<FaultInjection>,
}

impl ScenarioConfig {
    /// Check all parameters; must pass before a simulation is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gates == 0 {
            return Err(ConfigError::NonPositiveCount { what: "gate" });
        }
        if self.spots == 0 {
            return Err(ConfigError::NonPositiveCount { what: "spot" });
        }
        if self.chargers == 0 {
            return Err(ConfigError::NonPositiveCount { what: "charger" });
        }
        if self.charge_duration_ticks == 0 {
            return Err(ConfigError::ZeroChargeDuration);
        }

        for (channel, value) in [
            ("gate", self.noise.gate),
            ("occupancy", self.noise.occupancy),
            ("charger", self.noise.charger),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NoiseOutOfRange { channel, value });
            }
        }

        for fault in &self.faults {
            let exists = match fault.target {
                Device::Gate(id) => id.index() < self.gates as usize,
                Device::Spot(id) => id.index() < self.spots as usize,
                Device::Charger(id) => id.index() < self.chargers as usize,
            };
            if !exists {
                return Err(ConfigError::UnknownFaultTarget {
                    tick: fault.tick,
                    target: fault.target,
                });
            }
            let kind_fits = matches!(
                (fault.target, fault.kind),
                (Device::Gate(_), FaultKind::GateStuck)
                    | (Device::Charger(_), FaultKind::ChargerFailure)
            );
            if !kind_fits {
                return Err(ConfigError::FaultKindMismatch {
                    tick: fault.tick,
                    target: fault.target,
                    kind: fault.kind,
                });
            }
        }

        Ok(())
    }

    /// Number of vehicles the schedule will spawn.
    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.arrivals.len()
    }

    // ── Named presets ─────────────────────────────────────────────────────
    //
    // These mirror the depot's standard acceptance scenarios and are what
    // the test suites and downstream CLIs run.

    /// Steady arrivals, clean sensors, no faults.
    pub fn normal_operation() -> Self {
        Self {
            gates: 2,
            spots: 5,
            chargers: 3,
            arrivals: vec![0, 2, 4, 6, 8],
            charge_duration_ticks: 5,
            noise: NoiseProfile::CLEAN,
            seed: 42,
            faults: vec![],
        }
    }

    /// A single charger that fails at tick 30 while a vehicle is on it.
    pub fn charger_failure() -> Self {
        Self {
            gates: 2,
            spots: 5,
            chargers: 1,
            arrivals: vec![0],
            charge_duration_ticks: 60,
            noise: NoiseProfile::CLEAN,
            seed: 7,
            faults: vec![FaultInjection {
                tick: Tick(30),
                target: Device::Charger(ChargerId(0)),
                kind: FaultKind::ChargerFailure,
            }],
        }
    }

    /// Entry gate jams open at tick 2, while the controller is still
    /// cycling it for admissions.
    pub fn stuck_gate() -> Self {
        Self {
            gates: 2,
            spots: 5,
            chargers: 3,
            arrivals: vec![0, 1, 2],
            charge_duration_ticks: 5,
            noise: NoiseProfile::CLEAN,
            seed: 11,
            faults: vec![FaultInjection {
                tick: Tick(2),
                target: Device::Gate(GateId(0)),
                kind: FaultKind::GateStuck,
            }],
        }
    }

    /// 10% independent false occupancy readings, no real faults.
    pub fn sensor_noise() -> Self {
        Self {
            gates: 2,
            spots: 5,
            chargers: 3,
            arrivals: vec![0, 3, 6, 9, 12],
            charge_duration_ticks: 5,
            noise: NoiseProfile { gate: 0.0, occupancy: 0.10, charger: 0.0 },
            seed: 42,
            faults: vec![],
        }
    }

    /// Ten simultaneous arrivals competing for 8 spots and 6 chargers.
    pub fn high_load() -> Self {
        Self {
            gates: 2,
            spots: 8,
            chargers: 6,
            arrivals: vec![0; 10],
            charge_duration_ticks: 5,
            noise: NoiseProfile::CLEAN,
            seed: 99,
            faults: vec![],
        }
    }

    // ── Device enumeration helpers ────────────────────────────────────────

    /// All devices in the fixed sampling order: gates, then spots, then
    /// chargers, each ascending by id.
    pub fn devices(&self) -> impl Iterator<Item = Device> + '_ {
        let gates = (0..self.gates).map(|i| Device::Gate(GateId(i)));
        let spots = (0..self.spots).map(|i| Device::Spot(SpotId(i)));
        let chargers = (0..self.chargers).map(|i| Device::Charger(ChargerId(i)));
        gates.chain(spots).chain(chargers)
    }

    /// Id of the entry gate.
    #[inline]
    pub fn entry_gate(&self) -> GateId {
        GateId(0)
    }

    /// Id of the exit gate (same as entry in a 1-gate depot).
    #[inline]
    pub fn exit_gate(&self) -> GateId {
        GateId(self.gates - 1)
    }
}
