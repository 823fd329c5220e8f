// src/simulators/mod.rs

pub mod economy;
pub mod simulation_trait;

pub use economy::{Economy, RoundPhase};
pub use simulation_trait::Simulation;
