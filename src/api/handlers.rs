//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::{debug, warn};

use super::AppState;
use super::types::{ErrorResponse, HealthResponse, RootResponse, SimulateQuery};
use crate::report::{SimulationReport, StateRecord};
use crate::simulation::simulate;

/// Returns the service banner.
///
/// `GET /` → 200 + `RootResponse` JSON
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Energy savings simulation API",
        status: "online",
        endpoints: ["/health", "/states", "/simulate"],
    })
}

/// Liveness probe.
///
/// `GET /health` → 200 + `{"status": "healthy"}`
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Lists every state with its regulated tariff.
///
/// `GET /states` → 200 + `Vec<StateRecord>` JSON
pub async fn get_states(State(state): State<Arc<AppState>>) -> Json<Vec<StateRecord>> {
    Json(
        state
            .catalog
            .list_states()
            .iter()
            .map(StateRecord::from)
            .collect(),
    )
}

/// Runs a savings simulation.
///
/// `GET /simulate?state=SP&consumption_kwh=30000` → 200 + `SimulationReport` JSON
/// `GET /simulate?state=XX&consumption_kwh=30000` → 404 + `ErrorResponse`
/// `GET /simulate?state=SP&consumption_kwh=99999999999` → 400 + `ErrorResponse` (above bound)
pub async fn get_simulation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<SimulationReport>, (StatusCode, Json<ErrorResponse>)> {
    if query.consumption_kwh > state.max_consumption_kwh {
        warn!(consumption_kwh = %query.consumption_kwh, "consumption above configured bound");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!(
                    "`consumption_kwh` ({}) must be <= {}",
                    query.consumption_kwh, state.max_consumption_kwh
                ),
            }),
        ));
    }

    match simulate(&state.catalog, &query.state, query.consumption_kwh) {
        Some(result) => Ok(Json(SimulationReport::from(&result))),
        None => {
            debug!(state = %query.state, "no simulation available");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!(
                        "no savings simulation available for state \"{}\" with consumption {} kWh",
                        query.state, query.consumption_kwh
                    ),
                }),
            ))
        }
    }
}
