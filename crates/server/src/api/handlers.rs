use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::encode_metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub overloaded: bool,
    pub gate_enabled: bool,
    /// RFC 3339 time of the last overload flip, if any.
    pub last_toggled_at: Option<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        overloaded: state.issuer().is_overloaded(),
        gate_enabled: state.config().gate.enabled,
        last_toggled_at: state.last_toggle().map(|at| at.to_rfc3339()),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics() -> String {
    encode_metrics()
}
