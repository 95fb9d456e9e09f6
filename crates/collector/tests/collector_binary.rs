use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tempfile::TempDir;
use tokio::time::timeout;

const REPORT: &str = "timestamp,data\n5,data-0\n6,data-1\n";

/// Stub service: hands out one ticket and answers "not ready" once.
async fn spawn_stub() -> SocketAddr {
    async fn request_report() -> &'static str {
        "stub-identity_5"
    }

    async fn get_report(State(polls): State<Arc<AtomicU32>>) -> Response {
        if polls.fetch_add(1, Ordering::SeqCst) == 0 {
            return "report is not ready".into_response();
        }
        (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"5.csv\""),
            ],
            REPORT,
        )
            .into_response()
    }

    let app = Router::new()
        .route("/request_report", get(request_report))
        .route("/get_report/{ticket_id}", get(get_report))
        .with_state(Arc::new(AtomicU32::new(0)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn collector_command(api_url: &str) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_report-collector"));
    command
        .env_remove("REPORT_COLLECTOR_CONFIG")
        .env("REPORT_API_URL", api_url)
        .env("REPORT_COLLECTOR_RETRY_INTERVAL_MS", "50")
        .env("REPORT_COLLECTOR_DEADLINE_MS", "5000")
        .env("RUST_LOG", "error");
    command
}

#[tokio::test]
async fn test_collects_and_saves_report() {
    let addr = spawn_stub().await;
    let out = TempDir::new().unwrap();

    let result = timeout(
        Duration::from_secs(10),
        collector_command(&format!("http://{}", addr))
            .env("REPORT_COLLECTOR_OFFSET", "5")
            .env("REPORT_COLLECTOR_OUTPUT_DIR", out.path())
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let saved = std::fs::read_to_string(out.path().join("5.csv")).unwrap();
    assert_eq!(saved, REPORT);
}

#[tokio::test]
async fn test_unreachable_service_exits_with_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let result = timeout(
        Duration::from_secs(10),
        collector_command(&format!("http://{}", addr)).output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert_eq!(result.status.code(), Some(1));
}

#[tokio::test]
async fn test_invalid_api_url_exits_with_error() {
    let result = timeout(
        Duration::from_secs(10),
        collector_command("ftp://example.invalid").output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert_eq!(result.status.code(), Some(1));
}
