//! `depot-control` — decision logic and fault detection.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`controller`] | `DepotController` — gate planning, FIFO allocation, fault reaction |
//! | [`detector`]   | `FaultDetector` — per-device vote window over sensor history |
//!
//! Both operate purely on in-memory state handed to them each tick; neither
//! holds a reference to the engine, samples sensors, or draws randomness.

pub mod controller;
pub mod detector;

#[cfg(test)]
mod tests;

pub use controller::DepotController;
pub use detector::{FaultDetector, VOTE_THRESHOLD, VOTE_WINDOW};
