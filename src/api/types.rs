//! API query and response types.
//!
//! Simulation payloads reuse the rounded views from [`crate::report`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query parameters for the simulation endpoint.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Two-letter state code.
    pub state: String,
    /// Monthly consumption (kWh).
    pub consumption_kwh: Decimal,
}

/// Service banner returned by `/`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: [&'static str; 3],
}

/// Liveness response returned by `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
