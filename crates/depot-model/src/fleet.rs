//! Fleet — the arrival schedule and the active vehicle set.
//!
//! Vehicles live in a `BTreeMap<VehicleId, Vehicle>` so every iteration is
//! in ascending-id order; combined with the explicit `(arrival, id)` sort in
//! [`Fleet::queue_order`], all fleet traversals are deterministic.

use std::collections::{BTreeMap, VecDeque};

use depot_core::{Tick, VehicleId, VehicleState, VehicleStateChange};

use crate::vehicle::Vehicle;

/// All vehicles in the run: not-yet-arrived, active, and exited.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    /// Pending arrivals, ascending `(tick, id)`.  Drained from the front.
    pending: VecDeque<(Tick, VehicleId)>,
    /// Vehicles currently in the depot lifecycle.
    active: BTreeMap<VehicleId, Vehicle>,
    /// Vehicles that reached EXITED, retained for end-of-run reporting.
    exited: Vec<Vehicle>,
}

impl Fleet {
    /// Build a fleet from per-vehicle arrival ticks.  `VehicleId`s are
    /// assigned in schedule order, so equal arrival ticks tie-break by
    /// schedule position.
    pub fn from_schedule(arrivals: &[u64]) -> Self {
        let mut pending: Vec<(Tick, VehicleId)> = arrivals
            .iter()
            .enumerate()
            .map(|(i, &t)| (Tick(t), VehicleId(i as u32)))
            .collect();
        pending.sort();
        Self {
            pending: pending.into(),
            active: BTreeMap::new(),
            exited: Vec::new(),
        }
    }

    // ── Arrival processing ────────────────────────────────────────────────

    /// Create every vehicle scheduled to arrive at or before `now` and move
    /// it `ARRIVING → QUEUED` in the same tick.  Returns the transitions in
    /// arrival order for the output stream.
    pub fn spawn_arrivals(&mut self, now: Tick) -> Vec<VehicleStateChange> {
        let mut changes = Vec::new();
        while let Some(&(tick, id)) = self.pending.front() {
            if tick > now {
                break;
            }
            self.pending.pop_front();
            let mut vehicle = Vehicle::new(id, tick);
            changes.push(vehicle.transition(VehicleState::Queued, now));
            self.active.insert(id, vehicle);
        }
        changes
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.active.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.active.get_mut(&id)
    }

    /// Active vehicles in ascending-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.active.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.active.values_mut()
    }

    /// Ids of active vehicles in a given state, ascending.
    pub fn in_state(&self, state: VehicleState) -> Vec<VehicleId> {
        self.active
            .values()
            .filter(|v| v.state == state)
            .map(|v| v.id)
            .collect()
    }

    /// QUEUED and WAITING vehicles in strict allocation order: FIFO by
    /// arrival tick, ties broken by vehicle id.  WAITING vehicles sort by
    /// their original arrival, so a fault bounce never costs queue position.
    pub fn queue_order(&self) -> Vec<VehicleId> {
        let mut queue: Vec<(Tick, VehicleId)> = self
            .active
            .values()
            .filter(|v| matches!(v.state, VehicleState::Queued | VehicleState::Waiting))
            .map(|v| (v.arrival, v.id))
            .collect();
        queue.sort();
        queue.into_iter().map(|(_, id)| id).collect()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Remove an EXITED vehicle from the active set, retaining it for the
    /// final report.
    pub fn retire(&mut self, id: VehicleId) {
        if let Some(vehicle) = self.active.remove(&id) {
            debug_assert!(vehicle.state.is_terminal(), "retiring non-exited {id}");
            self.exited.push(vehicle);
        }
    }

    /// True when no vehicle remains active and no arrival is pending —
    /// the run's terminal condition.
    pub fn is_complete(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Every vehicle created so far, exited first, then active ascending.
    pub fn all_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.exited.iter().chain(self.active.values())
    }
}
