//! Common test utilities for in-process API testing.
//!
//! The fixture builds the real router over a synthetic generator with no
//! latency and an overload flag the test controls directly.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use report_apis::api::create_router;
use report_apis::state::AppState;
use report_core::{
    ApisConfig, IdentitySource, OverloadFlag, ReportConfig, ReportIssuer,
    SyntheticReportGenerator, UuidIdentitySource,
};

/// Test fixture wrapping the router and its overload flag.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_request_report() {
///     let fixture = TestFixture::new();
///     let response = fixture.get("/request_report?offset=5").await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    pub router: Router,
    /// Flag consulted by the issuer. Flip it to simulate overload.
    pub flag: OverloadFlag,
    pub state: Arc<AppState>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_report_config(ReportConfig {
            rows: 5,
            latency_ms: 0,
        })
    }

    pub fn with_report_config(report: ReportConfig) -> Self {
        Self::build(report, Arc::new(UuidIdentitySource::new()))
    }

    /// Fixture whose tickets get their identities from `identities`.
    pub fn with_identity_source(identities: Arc<dyn IdentitySource>) -> Self {
        Self::build(
            ReportConfig {
                rows: 5,
                latency_ms: 0,
            },
            identities,
        )
    }

    fn build(report: ReportConfig, identities: Arc<dyn IdentitySource>) -> Self {
        let mut config = ApisConfig::default();
        config.report = report.clone();
        config.gate.enabled = false;

        let flag = OverloadFlag::default();
        let issuer = ReportIssuer::new(
            identities,
            Arc::new(flag.clone()),
            Arc::new(SyntheticReportGenerator::new(report)),
        );
        let state = Arc::new(AppState::new(config, issuer));

        Self {
            router: create_router(Arc::clone(&state)),
            flag,
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Request a ticket and return it as sent on the wire.
    pub async fn request_ticket(&self, offset: Option<u64>) -> String {
        let uri = match offset {
            Some(offset) => format!("/request_report?offset={}", offset),
            None => "/request_report".to_string(),
        };
        let response = self.get(&uri).await;
        assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
        response.body
    }
}
