//! Batch execution of independent scenarios.
//!
//! Each scenario builds its own fully isolated `Sim` (own RNG streams, own
//! state), so runs never interact and the per-scenario results are identical
//! whether the batch executes serially or on Rayon's thread pool.

use depot_core::ScenarioConfig;

use crate::builder::SimBuilder;
use crate::error::SimResult;
use crate::observer::NoopObserver;
use crate::report::SimulationReport;

fn run_one(scenario: &ScenarioConfig, max_ticks: u64) -> SimResult<SimulationReport> {
    let mut sim = SimBuilder::new(scenario.clone()).build()?;
    sim.run(max_ticks, &mut NoopObserver)
}

/// Run every scenario to completion; results are in input order.
#[cfg(feature = "parallel")]
pub fn run_batch(
    scenarios: &[ScenarioConfig],
    max_ticks: u64,
) -> Vec<SimResult<SimulationReport>> {
    use rayon::prelude::*;
    scenarios.par_iter().map(|s| run_one(s, max_ticks)).collect()
}

/// Run every scenario to completion; results are in input order.
#[cfg(not(feature = "parallel"))]
pub fn run_batch(
    scenarios: &[ScenarioConfig],
    max_ticks: u64,
) -> Vec<SimResult<SimulationReport>> {
    scenarios.iter().map(|s| run_one(s, max_ticks)).collect()
}
