//! `depot-core` — foundational types for the depot HIL simulator.
//!
//! This crate is a dependency of every other `depot-*` crate.  It
//! intentionally has no `depot-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `GateId`, `SpotId`, `ChargerId`, `VehicleId`, `Device`   |
//! | [`time`]     | `Tick`, `SimClock`                                       |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                         |
//! | [`status`]   | `GateStatus`, `ChargerHealth`, `VehicleState`, `FaultKind` |
//! | [`events`]   | `SensorReading`, `ActuatorCommand`, `FaultEvent`, `VehicleStateChange` |
//! | [`scenario`] | `ScenarioConfig`, `FaultInjection`, `ConfigError`        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod events;
pub mod ids;
pub mod rng;
pub mod scenario;
pub mod status;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use events::{ActuatorCommand, Command, FaultEvent, SensorReading, SensorValue, VehicleStateChange};
pub use ids::{ChargerId, Device, DeviceKind, GateId, SpotId, VehicleId};
pub use rng::SimRng;
pub use scenario::{ConfigError, FaultInjection, NoiseProfile, ScenarioConfig};
pub use status::{ChargerHealth, FaultKind, GateStatus, VehicleState};
pub use time::{SimClock, Tick};
