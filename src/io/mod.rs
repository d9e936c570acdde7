//! Output writers for simulation results.

pub mod export;
