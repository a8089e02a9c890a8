//! Unit tests for depot-sensors.

use depot_core::{
    ChargerId, Device, GateId, GateStatus, NoiseProfile, SensorValue, SimRng, SpotId, Tick,
    VehicleId,
};
use depot_model::Depot;

use crate::SensorSuite;

#[test]
fn one_reading_per_device_in_fixed_order() {
    let depot = Depot::new(2, 3, 2);
    let mut suite = SensorSuite::new(NoiseProfile::CLEAN, SimRng::new(1));
    let readings = suite.sample_all(Tick(0), &depot);

    let targets: Vec<Device> = readings.iter().map(|r| r.target).collect();
    assert_eq!(
        targets,
        vec![
            Device::Gate(GateId(0)),
            Device::Gate(GateId(1)),
            Device::Spot(SpotId(0)),
            Device::Spot(SpotId(1)),
            Device::Spot(SpotId(2)),
            Device::Charger(ChargerId(0)),
            Device::Charger(ChargerId(1)),
        ]
    );
}

#[test]
fn clean_sensors_report_ground_truth() {
    let mut depot = Depot::new(1, 2, 1);
    depot.claim_spot(SpotId(1), VehicleId(0));
    depot.apply_gate_command(GateId(0), GateStatus::Open);

    let mut suite = SensorSuite::new(NoiseProfile::CLEAN, SimRng::new(5));
    for reading in suite.sample_all(Tick(3), &depot) {
        assert!(!reading.noisy);
        assert_eq!(reading.reported, reading.ground_truth);
        assert_eq!(reading.tick, Tick(3));
    }

    let readings = suite.sample_all(Tick(4), &depot);
    assert_eq!(readings[0].reported, SensorValue::Gate(GateStatus::Open));
    assert_eq!(readings[1].reported, SensorValue::Occupancy(false));
    assert_eq!(readings[2].reported, SensorValue::Occupancy(true));
}

#[test]
fn noisy_flag_tracks_corruption() {
    let depot = Depot::new(1, 1, 1);
    let mut suite = SensorSuite::new(NoiseProfile::uniform(1.0), SimRng::new(9));
    for reading in suite.sample_all(Tick(0), &depot) {
        assert!(reading.noisy);
        assert_eq!(reading.reported, reading.ground_truth.flipped());
    }
}

#[test]
fn noise_is_channel_scoped() {
    let depot = Depot::new(1, 1, 1);
    let noise = NoiseProfile { gate: 0.0, occupancy: 1.0, charger: 0.0 };
    let mut suite = SensorSuite::new(noise, SimRng::new(3));
    let readings = suite.sample_all(Tick(0), &depot);
    assert!(!readings[0].noisy, "gate channel is clean");
    assert!(readings[1].noisy, "occupancy channel always flips");
    assert!(!readings[2].noisy, "charger channel is clean");
}

#[test]
fn same_seed_same_noise_stream() {
    let depot = Depot::new(2, 5, 3);
    let noise = NoiseProfile::uniform(0.3);
    let mut a = SensorSuite::new(noise, SimRng::new(77));
    let mut b = SensorSuite::new(noise, SimRng::new(77));
    for t in 0..50 {
        assert_eq!(a.sample_all(Tick(t), &depot), b.sample_all(Tick(t), &depot));
    }
}
