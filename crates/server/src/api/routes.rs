use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use report_core::protocol::{GET_REPORT_PATH, REQUEST_REPORT_PATH};

use super::{handlers, middleware::metrics_middleware, reports};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Reports
        .route(REQUEST_REPORT_PATH, get(reports::request_report))
        .route(
            &format!("{}/{{ticket_id}}", GET_REPORT_PATH),
            get(reports::get_report),
        )
        // Operations
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
