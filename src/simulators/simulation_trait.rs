// src/simulators/simulation_trait.rs

use crate::metrics::RoundMetrics;

/// Anything that advances in discrete rounds and reports per-round metrics.
/// Hosts drive it in a loop and read snapshots in between.
pub trait Simulation {
    /// Runs one full round and returns the metrics it produced.
    fn step(&mut self) -> RoundMetrics;

    /// Rounds completed so far.
    fn round(&self) -> u64;

    /// Returns to the state right after construction, including the RNG.
    fn reset(&mut self);

    fn run(&mut self, rounds: u64) -> Vec<RoundMetrics> {
        (0..rounds).map(|_| self.step()).collect()
    }
}
