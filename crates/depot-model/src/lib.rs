//! `depot-model` — ground-truth state of the depot and its vehicles.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`depot`]      | `Depot` — dense gate/spot/charger state tables         |
//! | [`vehicle`]    | `Vehicle` — per-vehicle record and legal transitions   |
//! | [`fleet`]      | `Fleet` — arrival schedule, active set, FIFO ordering  |
//! | [`invariants`] | `InvariantViolation` and the whole-model safety check  |
//!
//! The `Depot` exclusively owns every gate, spot, and charger for the run's
//! lifetime; vehicles hold only id back-references into its tables.  All
//! mutation goes through the controller and engine — nothing here talks to
//! sensors or randomness.

pub mod depot;
pub mod fleet;
pub mod invariants;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use depot::{ChargerState, Depot, GateState, SpotState};
pub use fleet::Fleet;
pub use invariants::{check_invariants, InvariantViolation};
pub use vehicle::Vehicle;
