//! Ground-truth resource tables.
//!
//! Topology is fixed at scenario start: the tables never grow or shrink, and
//! a resource's identity is stable for the whole run.  Only the per-resource
//! status fields mutate, exclusively through the controller and engine.
//!
//! Each table keeps two distinct notions of "bad":
//!
//! - ground truth (`stuck`, `health`) — what the hardware actually does;
//!   set by fault injection, invisible to control logic until detected.
//! - `flagged` — the controller's knowledge, set when a `FaultEvent` is
//!   raised.  Allocation and gate planning consult only `flagged`, so an
//!   undetected failure can still be assigned — that window is exactly what
//!   the fault-detection latency bound is about.

use depot_core::{ChargerHealth, ChargerId, GateId, GateStatus, SpotId, Tick, VehicleId};

// ── Per-resource state records ────────────────────────────────────────────────

/// One gate.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateState {
    /// Last commanded position.
    pub commanded: GateStatus,
    /// Actual physical position (ground truth).
    pub actual: GateStatus,
    /// Ground truth: the gate ignores commands while stuck.
    pub stuck: bool,
    /// Tick the gate jammed, for detection-latency accounting.
    pub stuck_since: Option<Tick>,
    /// Controller knowledge: a `FaultEvent` has been raised for this gate.
    pub flagged: bool,
}

/// One parking spot.  Occupancy ground truth is `occupant.is_some()`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotState {
    pub occupant: Option<VehicleId>,
}

/// One charger.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargerState {
    /// Ground-truth health.
    pub health: ChargerHealth,
    /// Tick the charger failed, for detection-latency accounting.
    pub failed_since: Option<Tick>,
    pub assigned: Option<VehicleId>,
    /// Controller knowledge: unusable until explicitly recovered.
    pub flagged: bool,
}

// ── Depot ─────────────────────────────────────────────────────────────────────

/// Dense state tables for every physical resource, indexed by typed id.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    gates: Vec<GateState>,
    spots: Vec<SpotState>,
    chargers: Vec<ChargerState>,
}

impl Depot {
    pub fn new(gates: u16, spots: u16, chargers: u16) -> Self {
        Self {
            gates: vec![GateState::default(); gates as usize],
            spots: vec![SpotState::default(); spots as usize],
            chargers: vec![ChargerState::default(); chargers as usize],
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn gate(&self, id: GateId) -> &GateState {
        &self.gates[id.index()]
    }

    #[inline]
    pub fn spot(&self, id: SpotId) -> &SpotState {
        &self.spots[id.index()]
    }

    #[inline]
    pub fn charger(&self, id: ChargerId) -> &ChargerState {
        &self.chargers[id.index()]
    }

    #[inline]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    #[inline]
    pub fn charger_count(&self) -> usize {
        self.chargers.len()
    }

    pub fn gates(&self) -> impl Iterator<Item = (GateId, &GateState)> {
        self.gates.iter().enumerate().map(|(i, g)| (GateId(i as u16), g))
    }

    pub fn spots(&self) -> impl Iterator<Item = (SpotId, &SpotState)> {
        self.spots.iter().enumerate().map(|(i, s)| (SpotId(i as u16), s))
    }

    pub fn chargers(&self) -> impl Iterator<Item = (ChargerId, &ChargerState)> {
        self.chargers.iter().enumerate().map(|(i, c)| (ChargerId(i as u16), c))
    }

    // ── Free-pool views (ascending id, for deterministic allocation) ──────

    /// Spots with no occupant.
    pub fn free_spots(&self) -> impl Iterator<Item = SpotId> + '_ {
        self.spots().filter(|(_, s)| s.occupant.is_none()).map(|(id, _)| id)
    }

    /// Chargers the controller may allocate: unassigned and not flagged
    /// faulty.  Ground-truth health is deliberately not consulted — the
    /// controller only knows what detection has told it.
    pub fn allocatable_chargers(&self) -> impl Iterator<Item = ChargerId> + '_ {
        self.chargers()
            .filter(|(_, c)| c.assigned.is_none() && !c.flagged)
            .map(|(id, _)| id)
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Record `vehicle` as the occupant of `spot`.
    ///
    /// # Panics
    /// Debug-asserts the spot is free; the allocator's batch discipline
    /// guarantees it, and a violation is a controller bug the invariant
    /// checker will also catch.
    pub fn claim_spot(&mut self, spot: SpotId, vehicle: VehicleId) {
        let s = &mut self.spots[spot.index()];
        debug_assert!(s.occupant.is_none(), "{spot} already occupied");
        s.occupant = Some(vehicle);
    }

    pub fn release_spot(&mut self, spot: SpotId) {
        self.spots[spot.index()].occupant = None;
    }

    pub fn claim_charger(&mut self, charger: ChargerId, vehicle: VehicleId) {
        let c = &mut self.chargers[charger.index()];
        debug_assert!(c.assigned.is_none(), "{charger} already assigned");
        c.assigned = Some(vehicle);
    }

    pub fn release_charger(&mut self, charger: ChargerId) {
        self.chargers[charger.index()].assigned = None;
    }

    // ── Actuation ─────────────────────────────────────────────────────────

    /// Record a gate command and move the gate — unless it is stuck, in
    /// which case commanded and actual diverge (the STUCK condition the
    /// fault detector looks for).
    pub fn apply_gate_command(&mut self, gate: GateId, position: GateStatus) {
        let g = &mut self.gates[gate.index()];
        g.commanded = position;
        if !g.stuck {
            g.actual = position;
        }
    }

    // ── Fault injection (ground truth) ────────────────────────────────────

    /// Jam a gate at its current position from `tick` onward.
    pub fn jam_gate(&mut self, gate: GateId, tick: Tick) {
        let g = &mut self.gates[gate.index()];
        if !g.stuck {
            g.stuck = true;
            g.stuck_since = Some(tick);
        }
    }

    /// Fail a charger from `tick` onward.  Permanent: no recovery is modeled.
    pub fn fail_charger(&mut self, charger: ChargerId, tick: Tick) {
        let c = &mut self.chargers[charger.index()];
        if c.health == ChargerHealth::Ok {
            c.health = ChargerHealth::Failed;
            c.failed_since = Some(tick);
        }
    }

    // ── Controller knowledge ──────────────────────────────────────────────

    pub fn flag_gate(&mut self, gate: GateId) {
        self.gates[gate.index()].flagged = true;
    }

    pub fn flag_charger(&mut self, charger: ChargerId) {
        self.chargers[charger.index()].flagged = true;
    }
}
