//! Collector against a live service over loopback HTTP.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, routing::get, Router};
use report_apis::api::create_router;
use report_apis::state::AppState;
use report_core::testing::{CountdownGate, StaticGate};
use report_core::{
    ApisConfig, CollectorError, CollectorState, HttpReportApi, PollPolicy, ReadinessGate,
    ReportCollector, ReportConfig, ReportIssuer, Step, SyntheticReportGenerator,
    UuidIdentitySource,
};

async fn spawn_service(gate: Arc<dyn ReadinessGate>) -> SocketAddr {
    let report = ReportConfig {
        rows: 5,
        latency_ms: 0,
    };
    let issuer = ReportIssuer::new(
        Arc::new(UuidIdentitySource::new()),
        gate,
        Arc::new(SyntheticReportGenerator::new(report)),
    );
    let state = Arc::new(AppState::new(ApisConfig::default(), issuer));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    addr
}

/// Stub service answering each step with a fixed status, counting polls.
async fn spawn_stub(
    request_status: StatusCode,
    poll_status: StatusCode,
) -> (SocketAddr, Arc<AtomicU32>) {
    let polls = Arc::new(AtomicU32::new(0));

    let app = Router::new()
        .route(
            "/request_report",
            get(move || async move { (request_status, "stub-identity_0") }),
        )
        .route(
            "/get_report/{ticket_id}",
            get(move |State(polls): State<Arc<AtomicU32>>| async move {
                polls.fetch_add(1, Ordering::SeqCst);
                (poll_status, "stub says no")
            }),
        )
        .with_state(Arc::clone(&polls));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, polls)
}

fn fast_policy() -> PollPolicy {
    PollPolicy {
        retry_interval: Duration::from_millis(20),
        deadline: Duration::from_secs(10),
    }
}

fn collector_for(addr: SocketAddr, policy: PollPolicy) -> ReportCollector<HttpReportApi> {
    let api = HttpReportApi::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    ReportCollector::new(api, policy)
}

#[tokio::test]
async fn test_collect_after_gate_clears() {
    let gate = Arc::new(CountdownGate::new(2));
    let addr = spawn_service(gate.clone()).await;
    let collector = collector_for(
        addr,
        PollPolicy {
            retry_interval: Duration::from_millis(50),
            deadline: Duration::from_secs(10),
        },
    );

    let started = Instant::now();
    let artifact = collector.collect(10000).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(gate.checks(), 3);
    assert_eq!(
        artifact.text(),
        "timestamp,data\n10000,data-0\n10001,data-1\n10002,data-2\n10003,data-3\n10004,data-4\n"
    );
    assert_eq!(artifact.content_type.as_deref(), Some("text/csv"));
    assert_eq!(artifact.file_name.as_deref(), Some("10000.csv"));
    assert_eq!(collector.state(), CollectorState::Completed);
}

#[tokio::test]
async fn test_collect_times_out_when_never_ready() {
    let addr = spawn_service(Arc::new(StaticGate::overloaded())).await;
    let collector = collector_for(
        addr,
        PollPolicy {
            retry_interval: Duration::from_millis(20),
            deadline: Duration::from_millis(300),
        },
    );

    let started = Instant::now();
    let err = collector.collect(0).await.unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {}", err);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(collector.state(), CollectorState::TimedOut);
}

#[tokio::test]
async fn test_collect_fails_when_service_unreachable() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let collector = collector_for(addr, PollPolicy::default());

    let err = collector.collect(0).await.unwrap_err();

    assert!(matches!(err, CollectorError::Transport { .. }), "got {}", err);
    assert!(matches!(collector.state(), CollectorState::Failed { .. }));
}

#[tokio::test]
async fn test_request_report_server_error_is_terminal() {
    let (addr, polls) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, StatusCode::OK).await;
    let collector = collector_for(addr, fast_policy());

    let err = collector.collect(0).await.unwrap_err();

    assert!(
        matches!(
            err,
            CollectorError::UnexpectedStatus {
                step: Step::RequestReport,
                status: 500,
                ..
            }
        ),
        "got {}",
        err
    );
    assert_eq!(polls.load(Ordering::SeqCst), 0);
    assert!(matches!(collector.state(), CollectorState::Failed { .. }));
}

#[tokio::test]
async fn test_get_report_client_error_is_not_retried() {
    let (addr, polls) = spawn_stub(StatusCode::OK, StatusCode::BAD_REQUEST).await;
    let collector = collector_for(addr, fast_policy());

    let err = collector.collect(0).await.unwrap_err();

    match &err {
        CollectorError::UnexpectedStatus { step, status, body } => {
            assert_eq!(*step, Step::GetReport);
            assert_eq!(*status, 400);
            assert_eq!(body, "stub says no");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    assert!(matches!(collector.state(), CollectorState::Failed { .. }));
}
