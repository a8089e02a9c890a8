//! The sensor suite: per-kind sampling behind one closed dispatch.

use depot_core::{Device, NoiseProfile, SensorReading, SensorValue, SimRng, Tick};
use depot_model::Depot;

/// Samples every device once per tick in fixed order: gates, spots,
/// chargers, each ascending by id.  The fixed order is what makes the
/// reading stream — and everything downstream of it — reproducible.
pub struct SensorSuite {
    noise: NoiseProfile,
    rng: SimRng,
}

impl SensorSuite {
    pub fn new(noise: NoiseProfile, rng: SimRng) -> Self {
        Self { noise, rng }
    }

    /// Read all sensors against the current ground truth.
    pub fn sample_all(&mut self, tick: Tick, depot: &Depot) -> Vec<SensorReading> {
        let mut readings =
            Vec::with_capacity(depot.gate_count() + depot.spot_count() + depot.charger_count());

        for (id, gate) in depot.gates() {
            readings.push(self.sample(
                tick,
                Device::Gate(id),
                SensorValue::Gate(gate.actual),
                self.noise.gate,
            ));
        }
        for (id, spot) in depot.spots() {
            readings.push(self.sample(
                tick,
                Device::Spot(id),
                SensorValue::Occupancy(spot.occupant.is_some()),
                self.noise.occupancy,
            ));
        }
        for (id, charger) in depot.chargers() {
            readings.push(self.sample(
                tick,
                Device::Charger(id),
                SensorValue::Charger(charger.health),
                self.noise.charger,
            ));
        }

        readings
    }

    /// One sample: flip the ground truth with probability `p_noise`.
    fn sample(
        &mut self,
        tick: Tick,
        target: Device,
        ground_truth: SensorValue,
        p_noise: f64,
    ) -> SensorReading {
        let noisy = self.rng.gen_bool(p_noise);
        let reported = if noisy { ground_truth.flipped() } else { ground_truth };
        SensorReading { tick, target, ground_truth, reported, noisy }
    }
}
