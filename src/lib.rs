//! Electricity savings simulator for regulated-tariff consumers.
//!
//! Given a Brazilian state and a monthly consumption, compares the regulated
//! tariff against every supplier offering distributed generation (GD) or
//! free-market ("Mercado Livre") supply in that state.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod io;
pub mod model;
pub mod report;
pub mod savings;
pub mod simulation;
