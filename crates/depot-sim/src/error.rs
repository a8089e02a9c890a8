//! Simulation error type.
//!
//! Only two conditions stop a run: a bad scenario (before any tick) and a
//! broken safety invariant (a controller-logic defect).  Hardware faults and
//! sensor noise are data in the output stream, never errors.

use depot_core::{ConfigError, Tick};
use depot_model::InvariantViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("safety invariant violated at {tick}: {violation}")]
    Invariant {
        tick: Tick,
        violation: InvariantViolation,
    },
}

pub type SimResult<T> = Result<T, SimError>;
