//! Per-vehicle record and the legal-transition table.

use depot_core::{ChargerId, SpotId, Tick, VehicleId, VehicleState, VehicleStateChange};

/// One vehicle.
///
/// Holds only id back-references into the depot's tables — never ownership —
/// so removing a vehicle at `Exited` cannot affect resource lifetime.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    /// Scheduled arrival tick.  Also the vehicle's queue priority for the
    /// whole run: a vehicle bounced back to WAITING keeps this key.
    pub arrival: Tick,
    pub state: VehicleState,
    pub spot: Option<SpotId>,
    pub charger: Option<ChargerId>,
    /// Tick of the most recent QUEUED/WAITING → ASSIGNED transition.
    pub assigned_at: Option<Tick>,
    /// Tick the current charging session started.  Reset if the vehicle is
    /// bounced to WAITING — a restarted session charges from scratch.
    pub charge_started: Option<Tick>,
    pub exited_at: Option<Tick>,
}

impl Vehicle {
    pub fn new(id: VehicleId, arrival: Tick) -> Self {
        Self {
            id,
            arrival,
            state: VehicleState::Arriving,
            spot: None,
            charger: None,
            assigned_at: None,
            charge_started: None,
            exited_at: None,
        }
    }

    /// Whether `from → to` is a legal state-machine edge.
    ///
    /// `Assigned → Waiting` covers a charger whose failure is detected in
    /// the one-tick handshake window before the vehicle starts charging.
    pub fn legal_transition(from: VehicleState, to: VehicleState) -> bool {
        use VehicleState::*;
        matches!(
            (from, to),
            (Arriving, Queued)
                | (Queued, Assigned)
                | (Assigned, Charging)
                | (Assigned, Waiting)
                | (Charging, Departing)
                | (Charging, Waiting)
                | (Waiting, Assigned)
                | (Departing, Exited)
        )
    }

    /// Move to `to`, returning the change record for the output stream.
    ///
    /// # Panics
    /// Debug-asserts the edge is legal; an illegal edge is an engine bug.
    pub fn transition(&mut self, to: VehicleState, tick: Tick) -> VehicleStateChange {
        debug_assert!(
            Self::legal_transition(self.state, to),
            "illegal transition {} -> {} for {}",
            self.state,
            to,
            self.id
        );
        let from = self.state;
        self.state = to;

        match to {
            VehicleState::Assigned => self.assigned_at = Some(tick),
            VehicleState::Charging => self.charge_started = Some(tick),
            VehicleState::Waiting => {
                // Resources were released by the caller; forget the session.
                self.assigned_at = None;
                self.charge_started = None;
            }
            VehicleState::Exited => self.exited_at = Some(tick),
            _ => {}
        }

        VehicleStateChange { tick, vehicle: self.id, from, to }
    }

    /// Ticks spent in the current charging session as of `now`.
    #[inline]
    pub fn charge_elapsed(&self, now: Tick) -> Option<u64> {
        self.charge_started.map(|t| now.since(t))
    }
}
