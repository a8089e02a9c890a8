//! Simulation construction.
//!
//! `SimBuilder` validates the scenario, derives the per-concern RNG streams
//! from the master seed, and wires the depot, fleet, sensors, controller,
//! and detector into a ready-to-step [`Sim`].

use depot_control::{DepotController, FaultDetector};
use depot_core::{ScenarioConfig, SimClock, SimRng};
use depot_model::{Depot, Fleet};
use depot_sensors::SensorSuite;

use crate::engine::Sim;
use crate::error::SimResult;

/// Seed offset of the sensor-noise RNG stream.
const SENSOR_STREAM: u64 = 0;

pub struct SimBuilder {
    scenario: ScenarioConfig,
}

impl SimBuilder {
    pub fn new(scenario: ScenarioConfig) -> Self {
        Self { scenario }
    }

    /// Validate the scenario and assemble the engine.
    ///
    /// Fails only on configuration errors; a valid scenario always builds.
    pub fn build(self) -> SimResult<Sim> {
        self.scenario.validate()?;

        let mut master = SimRng::new(self.scenario.seed);
        let sensor_rng = master.child(SENSOR_STREAM);

        let depot = Depot::new(self.scenario.gates, self.scenario.spots, self.scenario.chargers);
        let fleet = Fleet::from_schedule(&self.scenario.arrivals);
        let sensors = SensorSuite::new(self.scenario.noise, sensor_rng);
        let controller =
            DepotController::new(self.scenario.entry_gate(), self.scenario.exit_gate());
        let detector =
            FaultDetector::new(self.scenario.gates as usize, self.scenario.chargers as usize);

        // Injection order must not depend on how the schedule was written.
        let mut injections = self.scenario.faults.clone();
        injections.sort_by_key(|f| f.tick);

        Ok(Sim::assemble(
            self.scenario,
            SimClock::new(),
            depot,
            fleet,
            sensors,
            controller,
            detector,
            injections,
        ))
    }
}
