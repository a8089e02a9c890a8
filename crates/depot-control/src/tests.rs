//! Unit tests for depot-control.

use depot_core::{
    ChargerHealth, ChargerId, Command, Device, FaultEvent, FaultKind, GateId, GateStatus,
    SensorReading, SensorValue, SpotId, Tick, VehicleId, VehicleState,
};
use depot_model::{Depot, Fleet};

use crate::{DepotController, FaultDetector};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn gate_reading(tick: u64, gate: u16, status: GateStatus) -> SensorReading {
    SensorReading {
        tick: Tick(tick),
        target: Device::Gate(GateId(gate)),
        ground_truth: SensorValue::Gate(status),
        reported: SensorValue::Gate(status),
        noisy: false,
    }
}

fn charger_reading(tick: u64, charger: u16, health: ChargerHealth) -> SensorReading {
    SensorReading {
        tick: Tick(tick),
        target: Device::Charger(ChargerId(charger)),
        ground_truth: SensorValue::Charger(health),
        reported: SensorValue::Charger(health),
        noisy: false,
    }
}

fn spawned_fleet(arrivals: &[u64], now: u64) -> Fleet {
    let mut fleet = Fleet::from_schedule(arrivals);
    fleet.spawn_arrivals(Tick(now));
    fleet
}

// ── Gate planning ─────────────────────────────────────────────────────────────

mod gate_tests {
    use super::*;

    fn controller() -> DepotController {
        DepotController::new(GateId(0), GateId(1))
    }

    #[test]
    fn entry_opens_for_queued_vehicle_with_resources() {
        let depot = Depot::new(2, 1, 1);
        let fleet = spawned_fleet(&[0], 0);
        let commands = controller().plan_gates(Tick(0), &depot, &fleet);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].target, Device::Gate(GateId(0)));
        assert_eq!(commands[0].command, Command::OpenGate);
    }

    #[test]
    fn entry_stays_closed_without_free_charger() {
        let mut depot = Depot::new(2, 1, 1);
        depot.claim_charger(ChargerId(0), VehicleId(9));
        let fleet = spawned_fleet(&[0], 0);
        assert!(controller().plan_gates(Tick(0), &depot, &fleet).is_empty());
    }

    #[test]
    fn entry_stays_closed_with_empty_queue() {
        let depot = Depot::new(2, 1, 1);
        let fleet = Fleet::from_schedule(&[]);
        assert!(controller().plan_gates(Tick(0), &depot, &fleet).is_empty());
    }

    #[test]
    fn open_entry_closes_once_queue_drains() {
        let mut depot = Depot::new(2, 1, 1);
        depot.apply_gate_command(GateId(0), GateStatus::Open);
        let fleet = Fleet::from_schedule(&[]);
        let commands = controller().plan_gates(Tick(1), &depot, &fleet);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command, Command::CloseGate);
    }

    #[test]
    fn exit_opens_while_a_vehicle_departs() {
        let mut depot = Depot::new(2, 1, 1);
        let mut fleet = spawned_fleet(&[0], 0);
        let v = fleet.get_mut(VehicleId(0)).unwrap();
        v.transition(VehicleState::Assigned, Tick(0));
        v.transition(VehicleState::Charging, Tick(1));
        v.transition(VehicleState::Departing, Tick(6));
        depot.apply_gate_command(GateId(0), GateStatus::Closed);

        let commands = controller().plan_gates(Tick(6), &depot, &fleet);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].target, Device::Gate(GateId(1)));
        assert_eq!(commands[0].command, Command::OpenGate);
    }

    #[test]
    fn single_gate_serves_both_roles() {
        let controller = DepotController::new(GateId(0), GateId(0));
        let depot = Depot::new(1, 1, 1);
        let fleet = spawned_fleet(&[0], 0);
        let commands = controller.plan_gates(Tick(0), &depot, &fleet);
        assert_eq!(commands.len(), 1, "one gate, one command");
        assert_eq!(commands[0].command, Command::OpenGate);
    }
}

// ── Allocation ────────────────────────────────────────────────────────────────

mod allocation_tests {
    use super::*;

    fn controller() -> DepotController {
        DepotController::new(GateId(0), GateId(1))
    }

    #[test]
    fn fifo_by_arrival_then_id() {
        let mut depot = Depot::new(2, 3, 3);
        // Vehicle 0 arrives last; 1 and 2 tie at tick 0.
        let mut fleet = spawned_fleet(&[4, 0, 0], 4);

        let (_, changes) = controller().allocate(Tick(4), &mut depot, &mut fleet);
        let order: Vec<VehicleId> = changes.iter().map(|c| c.vehicle).collect();
        assert_eq!(order, vec![VehicleId(1), VehicleId(2), VehicleId(0)]);
        assert_eq!(fleet.get(VehicleId(1)).unwrap().spot, Some(SpotId(0)));
        assert_eq!(fleet.get(VehicleId(2)).unwrap().spot, Some(SpotId(1)));
    }

    #[test]
    fn batch_never_double_claims() {
        let mut depot = Depot::new(2, 2, 1);
        let mut fleet = spawned_fleet(&[0, 0, 0], 0);

        let (commands, changes) = controller().allocate(Tick(0), &mut depot, &mut fleet);
        // One charger: only one vehicle can be assigned despite two spots.
        assert_eq!(changes.len(), 1);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command, Command::StartCharge(VehicleId(0)));
        assert_eq!(depot.free_spots().count(), 1);
        assert_eq!(depot.allocatable_chargers().count(), 0);
        depot_model::check_invariants(&depot, &fleet).unwrap();
    }

    #[test]
    fn waiting_vehicle_beats_later_arrivals() {
        let mut depot = Depot::new(2, 2, 2);
        let mut fleet = spawned_fleet(&[0, 1], 1);
        // Vehicle 0 was bounced off a charger and now WAITS.
        let v0 = fleet.get_mut(VehicleId(0)).unwrap();
        v0.transition(VehicleState::Assigned, Tick(0));
        v0.transition(VehicleState::Waiting, Tick(1));

        let (_, changes) = controller().allocate(Tick(1), &mut depot, &mut fleet);
        assert_eq!(changes[0].vehicle, VehicleId(0));
        assert_eq!(changes[0].from, VehicleState::Waiting);
        assert_eq!(changes[1].vehicle, VehicleId(1));
        assert_eq!(changes[1].from, VehicleState::Queued);
    }

    #[test]
    fn flagged_charger_not_allocated() {
        let mut depot = Depot::new(2, 1, 1);
        depot.flag_charger(ChargerId(0));
        let mut fleet = spawned_fleet(&[0], 0);
        let (_, changes) = controller().allocate(Tick(0), &mut depot, &mut fleet);
        assert!(changes.is_empty());
        assert_eq!(fleet.get(VehicleId(0)).unwrap().state, VehicleState::Queued);
    }
}

// ── Fault reaction ────────────────────────────────────────────────────────────

mod reaction_tests {
    use super::*;

    #[test]
    fn charging_vehicle_bounced_to_waiting() {
        let controller = DepotController::new(GateId(0), GateId(1));
        let mut depot = Depot::new(2, 1, 1);
        let mut fleet = spawned_fleet(&[0], 0);

        let (_, changes) = controller.allocate(Tick(0), &mut depot, &mut fleet);
        assert_eq!(changes.len(), 1);
        fleet
            .get_mut(VehicleId(0))
            .unwrap()
            .transition(VehicleState::Charging, Tick(1));

        let fault = FaultEvent {
            raised_at: Tick(5),
            target: Device::Charger(ChargerId(0)),
            kind: FaultKind::ChargerFailure,
            latency: 2,
        };
        let (commands, changes) =
            controller.react_to_faults(Tick(5), &[fault], &mut depot, &mut fleet);

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command, Command::StopCharge);

        let v = fleet.get(VehicleId(0)).unwrap();
        assert_eq!(v.state, VehicleState::Waiting);
        assert_eq!(v.spot, None);
        assert_eq!(v.charger, None);
        assert_eq!(changes[0].from, VehicleState::Charging);
        assert_eq!(changes[0].to, VehicleState::Waiting);

        // Resource pools: spot back, charger flagged out.
        assert_eq!(depot.free_spots().count(), 1);
        assert_eq!(depot.allocatable_chargers().count(), 0);
        depot_model::check_invariants(&depot, &fleet).unwrap();
    }

    #[test]
    fn idle_charger_fault_only_flags() {
        let controller = DepotController::new(GateId(0), GateId(1));
        let mut depot = Depot::new(2, 1, 2);
        let mut fleet = Fleet::from_schedule(&[]);

        let fault = FaultEvent {
            raised_at: Tick(3),
            target: Device::Charger(ChargerId(1)),
            kind: FaultKind::ChargerFailure,
            latency: 2,
        };
        let (commands, changes) =
            controller.react_to_faults(Tick(3), &[fault], &mut depot, &mut fleet);
        assert!(commands.is_empty());
        assert!(changes.is_empty());
        assert!(depot.charger(ChargerId(1)).flagged);
    }

    #[test]
    fn stuck_gate_fault_flags_gate() {
        let controller = DepotController::new(GateId(0), GateId(1));
        let mut depot = Depot::new(2, 1, 1);
        let mut fleet = Fleet::from_schedule(&[]);

        let fault = FaultEvent {
            raised_at: Tick(8),
            target: Device::Gate(GateId(0)),
            kind: FaultKind::GateStuck,
            latency: 4,
        };
        controller.react_to_faults(Tick(8), &[fault], &mut depot, &mut fleet);
        assert!(depot.gate(GateId(0)).flagged);
    }
}

// ── Fault detection ───────────────────────────────────────────────────────────

mod detector_tests {
    use super::*;

    #[test]
    fn persistent_charger_failure_detected_with_latency_two() {
        let mut depot = Depot::new(1, 1, 1);
        let mut detector = FaultDetector::new(1, 1);

        // Healthy history.
        for t in 0..30 {
            let events = detector.scan(
                Tick(t),
                &depot,
                &[charger_reading(t, 0, ChargerHealth::Ok)],
            );
            assert!(events.is_empty());
        }

        depot.fail_charger(ChargerId(0), Tick(30));
        let mut raised = Vec::new();
        for t in 30..40 {
            raised.extend(detector.scan(
                Tick(t),
                &depot,
                &[charger_reading(t, 0, ChargerHealth::Failed)],
            ));
        }

        // Edge-triggered: exactly one event, at the third disagreeing sample.
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].raised_at, Tick(32));
        assert_eq!(raised[0].kind, FaultKind::ChargerFailure);
        assert_eq!(raised[0].latency, 2);
    }

    #[test]
    fn isolated_noise_never_raises() {
        let depot = Depot::new(1, 1, 1);
        let mut detector = FaultDetector::new(1, 1);

        // At most two corrupted samples per window — below the vote threshold.
        let pattern = [false, true, false, false, false, true, true, false, false, false];
        for (t, &flip) in pattern.iter().enumerate() {
            let health = if flip { ChargerHealth::Failed } else { ChargerHealth::Ok };
            let events = detector.scan(Tick(t as u64), &depot, &[charger_reading(t as u64, 0, health)]);
            assert!(events.is_empty(), "tick {t}: noise must not raise a fault");
        }
    }

    #[test]
    fn stuck_gate_detected_after_contrary_command() {
        let mut depot = Depot::new(1, 1, 1);
        let mut detector = FaultDetector::new(1, 1);

        // t0: commanded open; reading still shows last tick's closed state.
        depot.apply_gate_command(GateId(0), GateStatus::Open);
        assert!(detector.scan(Tick(0), &depot, &[gate_reading(0, 0, GateStatus::Closed)]).is_empty());

        // t1: gate jams in the open position.
        depot.jam_gate(GateId(0), Tick(1));
        assert!(detector.scan(Tick(1), &depot, &[gate_reading(1, 0, GateStatus::Open)]).is_empty());

        // t2: commanded closed; the stuck gate stays open from here on.
        depot.apply_gate_command(GateId(0), GateStatus::Closed);
        assert!(detector.scan(Tick(2), &depot, &[gate_reading(2, 0, GateStatus::Open)]).is_empty());

        let mut raised = Vec::new();
        for t in 3..10 {
            raised.extend(detector.scan(Tick(t), &depot, &[gate_reading(t, 0, GateStatus::Open)]));
        }
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].kind, FaultKind::GateStuck);
        assert_eq!(raised[0].raised_at, Tick(5));
        assert_eq!(raised[0].latency, 4, "onset at t1, raised at t5");
    }

    #[test]
    fn healthy_gate_cycling_never_disagrees() {
        let mut depot = Depot::new(1, 1, 1);
        let mut detector = FaultDetector::new(1, 1);

        // Flap the gate every tick; readings lag commands by one tick.
        let mut previous = GateStatus::Closed;
        for t in 0..20u64 {
            let desired = if t % 2 == 0 { GateStatus::Open } else { GateStatus::Closed };
            depot.apply_gate_command(GateId(0), desired);
            let events = detector.scan(Tick(t), &depot, &[gate_reading(t, 0, previous)]);
            assert!(events.is_empty(), "tick {t}: healthy gate flagged");
            previous = desired;
        }
    }

    #[test]
    fn occupancy_readings_are_ignored() {
        let depot = Depot::new(1, 1, 1);
        let mut detector = FaultDetector::new(1, 1);
        for t in 0..10u64 {
            // A persistently "wrong" occupancy feed must never raise a fault.
            let reading = SensorReading {
                tick: Tick(t),
                target: Device::Spot(SpotId(0)),
                ground_truth: SensorValue::Occupancy(false),
                reported: SensorValue::Occupancy(true),
                noisy: true,
            };
            assert!(detector.scan(Tick(t), &depot, &[reading]).is_empty());
        }
    }
}
