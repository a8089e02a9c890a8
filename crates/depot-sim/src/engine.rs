//! The tick-loop engine.
//!
//! `Sim` owns every piece of run state and advances it one tick at a time.
//! Phase order within a tick is fixed (see the crate docs); the one subtlety
//! is that sensing happens before actuation, so every reading reflects the
//! device state left behind by the *previous* tick.  The fault detector
//! compensates for that lag; nothing else needs to know.

use depot_control::{DepotController, FaultDetector};
use depot_core::{
    ActuatorCommand, Command, Device, FaultEvent, FaultInjection, GateStatus, ScenarioConfig,
    SensorReading, SensorValue, SimClock, Tick, VehicleState, VehicleStateChange,
};
use depot_model::{check_invariants, Depot, Fleet, InvariantViolation};
use depot_sensors::SensorSuite;

use crate::error::{SimError, SimResult};
use crate::observer::SimObserver;
use crate::report::{FrameResult, SimulationReport, VehicleOutcome};

/// One simulation run in progress.  Built by [`SimBuilder`](crate::SimBuilder).
pub struct Sim {
    scenario: ScenarioConfig,
    clock: SimClock,
    pub(crate) depot: Depot,
    pub(crate) fleet: Fleet,
    sensors: SensorSuite,
    controller: DepotController,
    detector: FaultDetector,

    /// Fault schedule sorted by tick; `next_injection` is the cursor.
    injections: Vec<FaultInjection>,
    next_injection: usize,

    /// Every fault event raised so far, in raise order.
    faults_raised: Vec<FaultEvent>,
    /// First invariant violation, if the run was aborted by one.
    violation: Option<InvariantViolation>,
}

impl Sim {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        scenario: ScenarioConfig,
        clock: SimClock,
        depot: Depot,
        fleet: Fleet,
        sensors: SensorSuite,
        controller: DepotController,
        detector: FaultDetector,
        injections: Vec<FaultInjection>,
    ) -> Self {
        Self {
            scenario,
            clock,
            depot,
            fleet,
            sensors,
            controller,
            detector,
            injections,
            next_injection: 0,
            faults_raised: Vec::new(),
            violation: None,
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// The tick the next call to [`step`](Sim::step) will execute.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    #[inline]
    pub fn depot(&self) -> &Depot {
        &self.depot
    }

    #[inline]
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// The violation that aborted the run, if any.
    #[inline]
    pub fn violation(&self) -> Option<&InvariantViolation> {
        self.violation.as_ref()
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Execute one full tick and return its frame.
    ///
    /// Errors only on a safety-invariant violation; the run must not be
    /// stepped further after that.
    pub fn step(&mut self) -> SimResult<FrameResult> {
        let now = self.clock.current_tick;

        // ① Inject scheduled faults, then spawn arrivals.
        self.apply_injections(now);
        let mut state_changes = self.fleet.spawn_arrivals(now);

        // ② Sense every device (pre-actuation ground truth + noise).
        let readings = self.sensors.sample_all(now, &self.depot);

        // ③ Control: gate planning, then atomic-batch allocation.
        let mut commands = self.controller.plan_gates(now, &self.depot, &self.fleet);
        let (alloc_commands, alloc_changes) =
            self.controller.allocate(now, &mut self.depot, &mut self.fleet);
        commands.extend(alloc_commands);
        state_changes.extend(alloc_changes);

        // ④ Actuate gate commands against ground truth.
        for command in &commands {
            let Device::Gate(gate) = command.target else { continue };
            match command.command {
                Command::OpenGate => self.depot.apply_gate_command(gate, GateStatus::Open),
                Command::CloseGate => self.depot.apply_gate_command(gate, GateStatus::Closed),
                _ => {}
            }
        }

        // ⑤ Advance vehicle lifecycles.
        let (advance_commands, advance_changes) = self.advance_vehicles(now, &readings);
        commands.extend(advance_commands);
        state_changes.extend(advance_changes);

        // ⑥ Detect faults and react in the same tick.
        let faults = self.detector.scan(now, &self.depot, &readings);
        if !faults.is_empty() {
            let (react_commands, react_changes) =
                self.controller
                    .react_to_faults(now, &faults, &mut self.depot, &mut self.fleet);
            commands.extend(react_commands);
            state_changes.extend(react_changes);
            self.faults_raised.extend_from_slice(&faults);
        }

        // ⑦ Verify safety invariants; a violation aborts the run.
        if let Err(violation) = check_invariants(&self.depot, &self.fleet) {
            self.violation = Some(violation.clone());
            return Err(SimError::Invariant { tick: now, violation });
        }

        self.clock.advance();

        Ok(FrameResult { tick: now, readings, commands, state_changes, faults })
    }

    /// Run until `max_ticks` ticks have executed or every vehicle has
    /// exited, whichever comes first.
    pub fn run<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer: &mut O,
    ) -> SimResult<SimulationReport> {
        while self.clock.current_tick.0 < max_ticks && !self.fleet.is_complete() {
            observer.on_tick_start(self.clock.current_tick);
            let frame = self.step()?;
            observer.on_frame(&frame);
        }
        let report = self.report();
        observer.on_run_end(&report);
        Ok(report)
    }

    /// Snapshot report — valid mid-run, at completion, and after an abort.
    pub fn report(&self) -> SimulationReport {
        let outcomes = self
            .fleet
            .all_vehicles()
            .map(|v| VehicleOutcome {
                vehicle: v.id,
                arrival: v.arrival,
                final_state: v.state,
                exited_at: v.exited_at,
            })
            .collect();
        SimulationReport {
            final_tick: self.clock.current_tick,
            outcomes,
            faults: self.faults_raised.clone(),
            invariant_violation: self.violation.is_some(),
        }
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Apply every scheduled fault whose tick has come.  Ground truth only;
    /// the controller learns about it from detection.
    fn apply_injections(&mut self, now: Tick) {
        while let Some(injection) = self.injections.get(self.next_injection) {
            if injection.tick > now {
                break;
            }
            match injection.target {
                Device::Gate(gate) => self.depot.jam_gate(gate, now),
                Device::Charger(charger) => self.depot.fail_charger(charger, now),
                // Validation rejects spot targets.
                Device::Spot(_) => {}
            }
            self.next_injection += 1;
        }
    }

    /// Move every vehicle whose progression condition is met.
    ///
    /// Categories are processed against the tick-start state snapshot, exit
    /// first, so no vehicle crosses two lifecycle edges in one tick.
    fn advance_vehicles(
        &mut self,
        now: Tick,
        readings: &[SensorReading],
    ) -> (Vec<ActuatorCommand>, Vec<VehicleStateChange>) {
        let mut commands = Vec::new();
        let mut changes = Vec::new();

        // DEPARTING → EXITED once the exit gate *reads* open.  The sensed
        // value, not ground truth: vehicles trust the same feed the
        // controller does.
        let exit_gate = self.controller.exit_gate();
        let exit_reads_open = readings.iter().any(|r| {
            r.target == Device::Gate(exit_gate)
                && r.reported == SensorValue::Gate(GateStatus::Open)
        });
        if exit_reads_open {
            for id in self.fleet.in_state(VehicleState::Departing) {
                let vehicle = self.fleet.get_mut(id).expect("in_state yields active ids");
                changes.push(vehicle.transition(VehicleState::Exited, now));
                self.fleet.retire(id);
            }
        }

        // CHARGING → DEPARTING when the session has run its full duration.
        // Resources release here, so the spot frees one tick before the
        // vehicle physically clears the exit gate.
        let duration = self.scenario.charge_duration_ticks;
        for id in self.fleet.in_state(VehicleState::Charging) {
            let vehicle = self.fleet.get_mut(id).expect("in_state yields active ids");
            if vehicle.charge_elapsed(now).is_some_and(|e| e >= duration) {
                let spot = vehicle.spot.take();
                let charger = vehicle.charger.take();
                changes.push(vehicle.transition(VehicleState::Departing, now));

                if let Some(spot) = spot {
                    self.depot.release_spot(spot);
                }
                if let Some(charger) = charger {
                    self.depot.release_charger(charger);
                    commands.push(ActuatorCommand {
                        tick: now,
                        target: Device::Charger(charger),
                        command: Command::StopCharge,
                    });
                }
            }
        }

        // ASSIGNED → CHARGING after the one-tick plug-in handshake.
        for id in self.fleet.in_state(VehicleState::Assigned) {
            let vehicle = self.fleet.get_mut(id).expect("in_state yields active ids");
            if vehicle.assigned_at.is_some_and(|t| t < now) {
                changes.push(vehicle.transition(VehicleState::Charging, now));
            }
        }

        (commands, changes)
    }
}
