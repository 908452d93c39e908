// crates/pledge-registry-server/tests/serve_http.rs
// ============================================================================
// Module: HTTP Serve Tests
// Description: End-to-end requests against a live listener.
// Purpose: Ensure routing, connect info, and on-disk stores work together.
// Dependencies: pledge-registry-server, pledge-registry-config, tokio, tempfile
// ============================================================================

//! ## Overview
//! Starts the server on an ephemeral port with `SQLite` and file-ledger
//! backends in a temp directory, speaks raw HTTP/1.1 over TCP, and shuts
//! down gracefully.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use pledge_registry_config::PledgeRegistryConfig;
use pledge_registry_server::PledgeServer;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn config_in(dir: &TempDir) -> PledgeRegistryConfig {
    let mut config = PledgeRegistryConfig::default();
    config.server.audit.enabled = false;
    config.store.path = dir.path().join("database/pledges.db");
    config.rate_limit.path = Some(dir.path().join("database/rate_limits.json"));
    config
}

async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: \
         application/x-www-form-urlencoded\r\nContent-Length: {}\r\nConnection: \
         close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn live_server_accepts_submission_and_counts_it() {
    let dir = TempDir::new().unwrap();
    let server = PledgeServer::from_config(config_in(&dir)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_listener(listener, async move {
        let _ = stop_rx.await;
    }));

    let count = send(addr, "GET", "/api/pledges/count", "").await;
    assert!(count.starts_with("HTTP/1.1 200"), "{count}");
    assert!(count.contains(r#""count":0"#), "{count}");
    assert!(!dir.path().join("database/pledges.db").exists());

    let body = "company_name=Acme&contact_name=Jo&email=jo%40acme.com&agree=1";
    let submitted = send(addr, "POST", "/api/pledges", body).await;
    assert!(submitted.starts_with("HTTP/1.1 200"), "{submitted}");
    assert!(submitted.contains(r#""success":true"#), "{submitted}");

    let duplicate = send(addr, "POST", "/process_pledge", body).await;
    assert!(duplicate.starts_with("HTTP/1.1 409"), "{duplicate}");

    let count = send(addr, "GET", "/get_pledge_count", "").await;
    assert!(count.contains(r#""count":1"#), "{count}");

    let wrong = send(addr, "DELETE", "/api/pledges/count", "").await;
    assert!(wrong.starts_with("HTTP/1.1 405"), "{wrong}");

    let ledger = std::fs::read_to_string(dir.path().join("database/rate_limits.json")).unwrap();
    let entries: std::collections::BTreeMap<String, i64> = serde_json::from_str(&ledger).unwrap();
    assert_eq!(entries.len(), 2);

    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn admin_route_is_disabled_without_credentials() {
    let dir = TempDir::new().unwrap();
    let server = PledgeServer::from_config(config_in(&dir)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_listener(listener, async move {
        let _ = stop_rx.await;
    }));
    let response = send(addr, "GET", "/admin/pledges", "").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");
    stop_tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
