//! `depot-sensors` — the sensor model.
//!
//! Produces exactly one [`SensorReading`](depot_core::SensorReading) per
//! physical device per tick: the ground-truth value from the depot tables,
//! plus a reported value that is independently flipped with the channel's
//! configured probability.  Noise is stateless and memoryless across ticks;
//! persistent divergence only ever comes from injected ground-truth faults.
//!
//! The suite owns its own child RNG, so the noise stream is unaffected by
//! any other random draw in the run.

pub mod suite;

#[cfg(test)]
mod tests;

pub use suite::SensorSuite;
