//! `depot-sim` — tick loop orchestrator for the depot HIL simulator.
//!
//! # The tick loop
//!
//! ```text
//! for tick in 0..max_ticks (or until every vehicle has EXITED):
//!   ① Inject    — apply scheduled ground-truth faults; spawn arrivals
//!                 (ARRIVING → QUEUED, same tick).
//!   ② Sense     — one noisy SensorReading per device.
//!   ③ Control   — gate planning, then atomic-batch FIFO allocation.
//!   ④ Actuate   — apply gate commands to ground truth (stuck gates ignore).
//!   ⑤ Advance   — ASSIGNED → CHARGING (handshake delay), CHARGING →
//!                 DEPARTING (duration elapsed), DEPARTING → EXITED (exit
//!                 gate reports open).
//!   ⑥ Detect    — vote-window fault scan; controller reacts to new events
//!                 (CHARGING → WAITING, resource flagged unusable).
//!   ⑦ Verify    — safety invariants; a violation aborts the run.
//! ```
//!
//! Each tick emits a [`FrameResult`]; a full run yields a
//! [`SimulationReport`].  Identical `(scenario, seed)` inputs always produce
//! identical traces.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | [`run_batch`] executes scenarios on Rayon's thread pool.  |
//! | `serde`    | Serde derives on all public types.                        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use depot_core::ScenarioConfig;
//! use depot_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(ScenarioConfig::normal_operation()).build()?;
//! let report = sim.run(200, &mut NoopObserver)?;
//! assert!(report.all_exited());
//! ```

pub mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod report;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use batch::run_batch;
pub use builder::SimBuilder;
pub use engine::Sim;
pub use error::{SimError, SimResult};
pub use observer::{FrameLog, NoopObserver, SimObserver};
pub use report::{FrameResult, SimulationReport, VehicleOutcome};
