//! Whole-model safety check, run by the engine at the end of every tick.
//!
//! A violation is a controller-logic defect, not a recoverable runtime
//! condition: the engine aborts the run on the first one found.

use depot_core::{Device, VehicleId, VehicleState};
use thiserror::Error;

use crate::depot::Depot;
use crate::fleet::Fleet;

/// A broken safety guarantee.  Always fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("{resource} claimed by both {first} and {second}")]
    DoubleBooked {
        resource: Device,
        first: VehicleId,
        second: VehicleId,
    },

    #[error("vehicle {vehicle} in state {state} holds {resource}")]
    ResourceHeldInIllegalState {
        vehicle: VehicleId,
        state: VehicleState,
        resource: Device,
    },

    #[error("{resource} and {vehicle} disagree about their binding")]
    ClaimMismatch { resource: Device, vehicle: VehicleId },
}

/// Verify the mutual-exclusion and state-legality invariants.
///
/// 1. Each spot is occupied by at most one vehicle and vice versa.
/// 2. Each charger serves at most one vehicle and vice versa.
/// 3. Resource references only exist in states allowed to hold them, and
///    every claim is mirrored on both sides (vehicle back-reference and
///    depot table agree).
pub fn check_invariants(depot: &Depot, fleet: &Fleet) -> Result<(), InvariantViolation> {
    let mut spot_claims: Vec<Option<VehicleId>> = vec![None; depot.spot_count()];
    let mut charger_claims: Vec<Option<VehicleId>> = vec![None; depot.charger_count()];

    for vehicle in fleet.iter() {
        if let Some(spot) = vehicle.spot {
            let resource = Device::Spot(spot);
            if !vehicle.state.may_hold_resources() {
                return Err(InvariantViolation::ResourceHeldInIllegalState {
                    vehicle: vehicle.id,
                    state: vehicle.state,
                    resource,
                });
            }
            if let Some(first) = spot_claims[spot.index()] {
                return Err(InvariantViolation::DoubleBooked {
                    resource,
                    first,
                    second: vehicle.id,
                });
            }
            spot_claims[spot.index()] = Some(vehicle.id);
            if depot.spot(spot).occupant != Some(vehicle.id) {
                return Err(InvariantViolation::ClaimMismatch { resource, vehicle: vehicle.id });
            }
        }

        if let Some(charger) = vehicle.charger {
            let resource = Device::Charger(charger);
            if !vehicle.state.may_hold_resources() {
                return Err(InvariantViolation::ResourceHeldInIllegalState {
                    vehicle: vehicle.id,
                    state: vehicle.state,
                    resource,
                });
            }
            if let Some(first) = charger_claims[charger.index()] {
                return Err(InvariantViolation::DoubleBooked {
                    resource,
                    first,
                    second: vehicle.id,
                });
            }
            charger_claims[charger.index()] = Some(vehicle.id);
            if depot.charger(charger).assigned != Some(vehicle.id) {
                return Err(InvariantViolation::ClaimMismatch { resource, vehicle: vehicle.id });
            }
        }
    }

    // Depot-side claims must point back at a live vehicle that agrees.
    for (id, spot) in depot.spots() {
        if let Some(occupant) = spot.occupant {
            let agrees = fleet.get(occupant).is_some_and(|v| v.spot == Some(id));
            if !agrees {
                return Err(InvariantViolation::ClaimMismatch {
                    resource: Device::Spot(id),
                    vehicle: occupant,
                });
            }
        }
    }
    for (id, charger) in depot.chargers() {
        if let Some(assigned) = charger.assigned {
            let agrees = fleet.get(assigned).is_some_and(|v| v.charger == Some(id));
            if !agrees {
                return Err(InvariantViolation::ClaimMismatch {
                    resource: Device::Charger(id),
                    vehicle: assigned,
                });
            }
        }
    }

    Ok(())
}
