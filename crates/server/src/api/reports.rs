//! Report API handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use report_core::protocol::{attachment_disposition, NOT_READY_BODY, REPORT_CONTENT_TYPE};
use report_core::ticket::parse_offset;
use report_core::{IssueError, Lookup};

use crate::metrics::{REPORT_LOOKUPS_TOTAL, TICKETS_ISSUED_TOTAL};
use crate::state::AppState;

/// Query parameters for requesting a report
#[derive(Debug, Deserialize)]
pub struct RequestReportParams {
    /// Row to resume from. Missing or blank means 0.
    pub offset: Option<String>,
}

/// Error response for the report endpoints.
///
/// Malformed input maps to 400, everything else to 500. The body is the
/// plain error text.
#[derive(Debug)]
pub struct ApiError(IssueError);

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.0.to_string()).into_response()
    }
}

/// Issue a ticket for a report starting at `offset`.
pub async fn request_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RequestReportParams>,
) -> Result<String, ApiError> {
    let offset = match params.offset.as_deref() {
        None => None,
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => Some(parse_offset(raw).map_err(|e| {
            warn!(offset = raw, "Rejected report request: {}", e);
            ApiError(e.into())
        })?),
    };

    info!(
        offset = offset.unwrap_or(0),
        overloaded = state.issuer().is_overloaded(),
        "Report requested"
    );

    let ticket = state.issuer().submit(offset).map_err(|e| {
        error!("Failed to issue ticket: {}", e);
        ApiError(e)
    })?;
    TICKETS_ISSUED_TOTAL.inc();

    Ok(ticket.encode())
}

/// Return the report for a ticket, or the not-ready sentinel while overloaded.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<String>,
) -> Result<Response, ApiError> {
    let lookup = match state.issuer().lookup(&ticket_id).await {
        Ok(lookup) => lookup,
        Err(e) => {
            let outcome = if e.is_client_error() { "invalid" } else { "error" };
            REPORT_LOOKUPS_TOTAL.with_label_values(&[outcome]).inc();
            warn!(ticket = %ticket_id, "Report lookup failed: {}", e);
            return Err(ApiError(e));
        }
    };

    let report = match lookup {
        Lookup::NotReady => {
            REPORT_LOOKUPS_TOTAL.with_label_values(&["not_ready"]).inc();
            return Ok(NOT_READY_BODY.into_response());
        }
        Lookup::Ready(report) => report,
    };

    let body = report.to_csv().map_err(|e| {
        REPORT_LOOKUPS_TOTAL.with_label_values(&["error"]).inc();
        error!(ticket = %ticket_id, "Failed to encode report: {}", e);
        ApiError(e.into())
    })?;
    REPORT_LOOKUPS_TOTAL.with_label_values(&["ready"]).inc();

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                attachment_disposition(&report.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}
