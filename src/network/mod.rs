// src/network/mod.rs

pub mod topology;

pub use topology::Topology;
