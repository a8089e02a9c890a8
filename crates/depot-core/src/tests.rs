//! Unit tests for depot-core.

use crate::*;

// ── Ids ───────────────────────────────────────────────────────────────────────

mod id_tests {
    use super::*;

    #[test]
    fn default_is_invalid_sentinel() {
        assert_eq!(GateId::default(), GateId::INVALID);
        assert_eq!(VehicleId::default(), VehicleId::INVALID);
    }

    #[test]
    fn ids_sort_by_inner_value() {
        let mut v = vec![VehicleId(3), VehicleId(1), VehicleId(2)];
        v.sort();
        assert_eq!(v, vec![VehicleId(1), VehicleId(2), VehicleId(3)]);
    }

    #[test]
    fn device_display_uses_hardware_names() {
        assert_eq!(Device::Gate(GateId(0)).to_string(), "gate_0");
        assert_eq!(Device::Spot(SpotId(4)).to_string(), "spot_4");
        assert_eq!(Device::Charger(ChargerId(2)).to_string(), "charger_2");
    }

    #[test]
    fn device_kind_matches_variant() {
        assert_eq!(Device::Charger(ChargerId(0)).kind(), DeviceKind::Charger);
        assert_eq!(Device::Spot(SpotId(0)).kind(), DeviceKind::Spot);
    }
}

// ── Time ──────────────────────────────────────────────────────────────────────

mod time_tests {
    use super::*;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - t, 5);
        assert_eq!(Tick(15).since(t), 5);
    }

    #[test]
    fn clock_advances_monotonically() {
        let mut clock = SimClock::new();
        assert_eq!(clock.current_tick, Tick::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
    }
}

// ── Rng ───────────────────────────────────────────────────────────────────────

mod rng_tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(123);
        let mut b = SimRng::new(123);
        for _ in 0..100 {
            assert_eq!(a.gen_range(0u32..1000), b.gen_range(0u32..1000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let va: Vec<u32> = (0..32).map(|_| a.gen_range(0..u32::MAX)).collect();
        let vb: Vec<u32> = (0..32).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn children_are_deterministic() {
        let mut parent1 = SimRng::new(77);
        let mut parent2 = SimRng::new(77);
        let mut c1 = parent1.child(5);
        let mut c2 = parent2.child(5);
        for _ in 0..20 {
            assert_eq!(c1.gen_range(0u64..u64::MAX), c2.gen_range(0u64..u64::MAX));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

// ── Sensor values ─────────────────────────────────────────────────────────────

mod value_tests {
    use super::*;

    #[test]
    fn flip_is_an_involution() {
        for v in [
            SensorValue::Gate(GateStatus::Open),
            SensorValue::Gate(GateStatus::Closed),
            SensorValue::Occupancy(true),
            SensorValue::Occupancy(false),
            SensorValue::Charger(ChargerHealth::Ok),
            SensorValue::Charger(ChargerHealth::Failed),
        ] {
            assert_ne!(v.flipped(), v);
            assert_eq!(v.flipped().flipped(), v);
        }
    }

    #[test]
    fn resource_holding_states() {
        assert!(VehicleState::Assigned.may_hold_resources());
        assert!(VehicleState::Charging.may_hold_resources());
        for s in [
            VehicleState::Arriving,
            VehicleState::Queued,
            VehicleState::Waiting,
            VehicleState::Departing,
            VehicleState::Exited,
        ] {
            assert!(!s.may_hold_resources(), "{s} must not hold resources");
        }
    }
}

// ── Scenario validation ───────────────────────────────────────────────────────

mod scenario_tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for scenario in [
            ScenarioConfig::normal_operation(),
            ScenarioConfig::charger_failure(),
            ScenarioConfig::stuck_gate(),
            ScenarioConfig::sensor_noise(),
            ScenarioConfig::high_load(),
        ] {
            scenario.validate().unwrap();
        }
    }

    #[test]
    fn zero_counts_rejected() {
        let mut s = ScenarioConfig::normal_operation();
        s.chargers = 0;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::NonPositiveCount { what: "charger" })
        ));
    }

    #[test]
    fn noise_out_of_range_rejected() {
        let mut s = ScenarioConfig::normal_operation();
        s.noise.occupancy = 1.5;
        assert!(matches!(s.validate(), Err(ConfigError::NoiseOutOfRange { .. })));
    }

    #[test]
    fn fault_on_nonexistent_device_rejected() {
        let mut s = ScenarioConfig::normal_operation();
        s.faults.push(FaultInjection {
            tick: Tick(5),
            target: Device::Charger(ChargerId(99)),
            kind: FaultKind::ChargerFailure,
        });
        assert!(matches!(s.validate(), Err(ConfigError::UnknownFaultTarget { .. })));
    }

    #[test]
    fn fault_kind_must_match_device_kind() {
        let mut s = ScenarioConfig::normal_operation();
        s.faults.push(FaultInjection {
            tick: Tick(5),
            target: Device::Gate(GateId(0)),
            kind: FaultKind::ChargerFailure,
        });
        assert!(matches!(s.validate(), Err(ConfigError::FaultKindMismatch { .. })));
    }

    #[test]
    fn spots_cannot_fault() {
        let mut s = ScenarioConfig::normal_operation();
        s.faults.push(FaultInjection {
            tick: Tick(5),
            target: Device::Spot(SpotId(0)),
            kind: FaultKind::ChargerFailure,
        });
        assert!(matches!(s.validate(), Err(ConfigError::FaultKindMismatch { .. })));
    }

    #[test]
    fn device_order_is_gates_spots_chargers() {
        let s = ScenarioConfig {
            gates: 1,
            spots: 2,
            chargers: 1,
            arrivals: vec![],
            charge_duration_ticks: 1,
            noise: NoiseProfile::CLEAN,
            seed: 0,
            faults: vec![],
        };
        let devices: Vec<Device> = s.devices().collect();
        assert_eq!(
            devices,
            vec![
                Device::Gate(GateId(0)),
                Device::Spot(SpotId(0)),
                Device::Spot(SpotId(1)),
                Device::Charger(ChargerId(0)),
            ]
        );
    }

    #[test]
    fn entry_and_exit_gate_split() {
        let s = ScenarioConfig::normal_operation();
        assert_eq!(s.entry_gate(), GateId(0));
        assert_eq!(s.exit_gate(), GateId(1));

        let mut single = s.clone();
        single.gates = 1;
        assert_eq!(single.entry_gate(), single.exit_gate());
    }
}
