//! The depot controller.
//!
//! Invoked once per tick in three steps, in order:
//!
//! 1. [`plan_gates`](DepotController::plan_gates) — entry gate opens iff the
//!    queue is non-empty and at least one free spot *and* one allocatable
//!    charger exist; the exit gate opens while any vehicle is departing.
//! 2. [`allocate`](DepotController::allocate) — FIFO assignment over QUEUED
//!    and WAITING vehicles as one atomic batch: each spot/charger is popped
//!    from the free pool the moment it is claimed, so a resource can never
//!    be handed to two vehicles in the same tick.
//! 3. [`react_to_faults`](DepotController::react_to_faults) — on a raised
//!    `FaultEvent`, release any vehicle bound to the faulted resource back
//!    to WAITING and flag the resource unusable for the rest of the run.
//!
//! The controller allocates from its own ground-truth claim tables, never
//! from raw sensor reports — a noisy "occupied" reading must not leak into
//! assignment decisions.

use std::collections::VecDeque;

use depot_core::{
    ActuatorCommand, Command, Device, FaultEvent, FaultKind, GateId, GateStatus, Tick,
    VehicleState, VehicleStateChange,
};
use depot_model::{Depot, Fleet};

/// Stateless decision logic for one depot.
///
/// The only configuration is which gate is the entry and which the exit;
/// everything else is recomputed from depot and fleet state every tick.
#[derive(Clone, Debug)]
pub struct DepotController {
    entry_gate: GateId,
    exit_gate: GateId,
}

impl DepotController {
    pub fn new(entry_gate: GateId, exit_gate: GateId) -> Self {
        Self { entry_gate, exit_gate }
    }

    // ── Gate control ──────────────────────────────────────────────────────

    /// Decide gate positions for this tick.  A command is only issued when
    /// the desired position differs from the last commanded one.
    pub fn plan_gates(&self, tick: Tick, depot: &Depot, fleet: &Fleet) -> Vec<ActuatorCommand> {
        let queue_waiting = !fleet.queue_order().is_empty();
        let admittable =
            depot.free_spots().next().is_some() && depot.allocatable_chargers().next().is_some();
        let departing = !fleet.in_state(VehicleState::Departing).is_empty();

        let mut want_entry_open = queue_waiting && admittable;
        let mut want_exit_open = departing;
        if self.entry_gate == self.exit_gate {
            // Single-gate depot: one gate serves both roles.
            let open = want_entry_open || want_exit_open;
            want_entry_open = open;
            want_exit_open = open;
        }

        let mut commands = Vec::new();
        for (gate, want_open) in [(self.entry_gate, want_entry_open), (self.exit_gate, want_exit_open)] {
            let desired = if want_open { GateStatus::Open } else { GateStatus::Closed };
            if depot.gate(gate).commanded != desired {
                commands.push(ActuatorCommand {
                    tick,
                    target: Device::Gate(gate),
                    command: if want_open { Command::OpenGate } else { Command::CloseGate },
                });
            }
            if self.entry_gate == self.exit_gate {
                break;
            }
        }
        commands
    }

    /// The gate a departing vehicle exits through.
    #[inline]
    pub fn exit_gate(&self) -> GateId {
        self.exit_gate
    }

    // ── Allocation ────────────────────────────────────────────────────────

    /// Assign free spots and allocatable chargers to QUEUED/WAITING vehicles
    /// in strict `(arrival, id)` order, as one atomic batch.
    ///
    /// Stops as soon as either pool runs dry — a vehicle is only assigned
    /// when *both* a spot and a charger are available for it.
    pub fn allocate(
        &self,
        tick: Tick,
        depot: &mut Depot,
        fleet: &mut Fleet,
    ) -> (Vec<ActuatorCommand>, Vec<VehicleStateChange>) {
        let mut spots: VecDeque<_> = depot.free_spots().collect();
        let mut chargers: VecDeque<_> = depot.allocatable_chargers().collect();

        let mut commands = Vec::new();
        let mut changes = Vec::new();

        for id in fleet.queue_order() {
            let (Some(&spot), Some(&charger)) = (spots.front(), chargers.front()) else {
                break;
            };
            spots.pop_front();
            chargers.pop_front();

            depot.claim_spot(spot, id);
            depot.claim_charger(charger, id);

            let vehicle = fleet
                .get_mut(id)
                .expect("queue_order only yields active vehicles");
            vehicle.spot = Some(spot);
            vehicle.charger = Some(charger);
            changes.push(vehicle.transition(VehicleState::Assigned, tick));

            commands.push(ActuatorCommand {
                tick,
                target: Device::Charger(charger),
                command: Command::StartCharge(id),
            });
        }

        (commands, changes)
    }

    // ── Fault reaction ────────────────────────────────────────────────────

    /// Handle fault events raised this tick: flag the resource unusable and
    /// bounce any bound vehicle to WAITING (it keeps its arrival priority
    /// and is retried by `allocate` from the next tick on).
    pub fn react_to_faults(
        &self,
        tick: Tick,
        faults: &[FaultEvent],
        depot: &mut Depot,
        fleet: &mut Fleet,
    ) -> (Vec<ActuatorCommand>, Vec<VehicleStateChange>) {
        let mut commands = Vec::new();
        let mut changes = Vec::new();

        for fault in faults {
            match (fault.kind, fault.target) {
                (FaultKind::ChargerFailure, Device::Charger(charger)) => {
                    depot.flag_charger(charger);
                    let Some(victim) = depot.charger(charger).assigned else {
                        continue;
                    };
                    commands.push(ActuatorCommand {
                        tick,
                        target: Device::Charger(charger),
                        command: Command::StopCharge,
                    });
                    depot.release_charger(charger);

                    let vehicle = fleet
                        .get_mut(victim)
                        .expect("depot claims only reference active vehicles");
                    if let Some(spot) = vehicle.spot.take() {
                        depot.release_spot(spot);
                    }
                    vehicle.charger = None;
                    changes.push(vehicle.transition(VehicleState::Waiting, tick));
                }
                (FaultKind::GateStuck, Device::Gate(gate)) => {
                    // No vehicle is ever bound to a gate; just flag it.
                    depot.flag_gate(gate);
                }
                _ => debug_assert!(false, "fault kind/target mismatch in {fault:?}"),
            }
        }

        (commands, changes)
    }
}
