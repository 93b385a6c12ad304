//! Resolution Client Tests
//!
//! Covers:
//! - Relay response interpretation over a real HTTP/1.1 exchange
//! - Adaptive timeout growth on timed-out requests
//! - Synchronous mode and `resolve_blocking`
//! - Transport failures

use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tldbridge::base::neterror::NetError;
use tldbridge::client::{AdaptiveTimeout, ResolutionClient, ResolutionOutcome, ResolveMode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `body` with `status` to every connection; returns the base URL and
/// the request heads seen so far.
async fn canned_relay(status: &'static str, body: String) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    tokio::spawn(async move {
        loop {
            if let Ok((mut socket, _)) = listener.accept().await {
                let body = body.clone();
                let seen = seen_clone.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    seen.lock()
                        .unwrap()
                        .push(String::from_utf8_lossy(&buf[..n]).into_owned());

                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        }
    });

    (format!("http://{}/", addr), seen)
}

/// Accept connections and never answer.
async fn silent_relay() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        }
    });

    format!("http://{}/", addr)
}

fn client(base: &str, timeout: Arc<AdaptiveTimeout>) -> ResolutionClient {
    ResolutionClient::builder()
        .base_url(base)
        .timeout(timeout)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_resolved_newline_list() {
    let (base, seen) = canned_relay("200 OK", "8.8.8.8\n8.8.4.4".to_string()).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
    assert_eq!(outcome.addresses(), ["8.8.8.8", "8.8.4.4"]);

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].starts_with("GET /resolve?domain=mysite.hns HTTP/1.1\r\n"),
        "unexpected request: {}",
        requests[0]
    );
}

#[tokio::test]
async fn test_resolved_comma_list() {
    let (base, _) = canned_relay("200 OK", "10.1.1.1,127.1.1.1".to_string()).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("multi.hns", ResolveMode::Asynchronous).await;
    assert_eq!(outcome.addresses(), ["10.1.1.1", "127.1.1.1"]);
}

#[tokio::test]
async fn test_empty_body_is_nxdomain() {
    let (base, _) = canned_relay("200 OK", String::new()).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("nonexistent.hns", ResolveMode::Asynchronous).await;
    assert!(outcome.is_nxdomain());
}

#[tokio::test]
async fn test_server_error_status() {
    let (base, _) = canned_relay("500 Internal Server Error", "8.8.8.8".to_string()).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
    assert!(matches!(
        outcome,
        ResolutionOutcome::Error(NetError::UnexpectedStatus(500))
    ));
}

#[tokio::test]
async fn test_html_body_is_invalid() {
    let (base, _) = canned_relay("200 OK", "<html>captive portal</html>".to_string()).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
    assert!(matches!(outcome.error(), Some(NetError::InvalidResponse)));
}

#[tokio::test]
async fn test_oversized_body() {
    let (base, _) = canned_relay("200 OK", "1".repeat(70 * 1024)).await;
    let client = client(&base, Arc::new(AdaptiveTimeout::default()));

    let outcome = client.resolve("big.hns", ResolveMode::Asynchronous).await;
    assert!(matches!(outcome.error(), Some(NetError::ResponseBodyTooBig)));
}

#[tokio::test]
async fn test_timeout_grows_adaptive_timeout() {
    let base = silent_relay().await;
    let timeout = Arc::new(AdaptiveTimeout::new(50.0, 120.0, 1.5));
    let client = client(&base, timeout.clone());

    let outcome = client.resolve("slow.hns", ResolveMode::Asynchronous).await;
    assert!(matches!(outcome.error(), Some(NetError::ConnectionTimedOut)));
    assert_eq!(timeout.current_ms(), 75.0);

    let outcome = client.resolve("slow.hns", ResolveMode::Asynchronous).await;
    assert!(outcome.error().unwrap().is_timeout());
    assert_eq!(timeout.current_ms(), 112.5);

    client.resolve("slow.hns", ResolveMode::Asynchronous).await;
    assert_eq!(timeout.current_ms(), 120.0);
}

#[tokio::test]
async fn test_success_keeps_timeout() {
    let (base, _) = canned_relay("200 OK", "1.2.3.4".to_string()).await;
    let timeout = Arc::new(AdaptiveTimeout::default());
    timeout.grow();
    let client = client(&base, timeout.clone());

    client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
    assert_eq!(timeout.current_ms(), 7500.0);
}

#[tokio::test]
async fn test_synchronous_mode_ignores_adaptive_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
            let response =
                "HTTP/1.1 200 OK\r\nContent-Length: 7\r\nConnection: close\r\n\r\n1.2.3.4";
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    let timeout = Arc::new(AdaptiveTimeout::new(20.0, 30000.0, 1.5));
    let client = client(&format!("http://{}/", addr), timeout.clone());

    let outcome = client.resolve("slow.hns", ResolveMode::Synchronous).await;
    assert_eq!(outcome.addresses(), ["1.2.3.4"]);
    assert_eq!(timeout.current_ms(), 20.0);
}

#[tokio::test]
async fn test_connection_refused_is_error_without_growth() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let timeout = Arc::new(AdaptiveTimeout::default());
    let client = client(&format!("http://{}/", addr), timeout.clone());

    let outcome = client.resolve("mysite.hns", ResolveMode::Asynchronous).await;
    assert!(outcome.is_error());
    assert!(!outcome.error().unwrap().is_timeout());
    assert_eq!(timeout.current_ms(), 5000.0);
}

#[test]
fn test_resolve_blocking() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = std::thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf);
        let response =
            "HTTP/1.1 200 OK\r\nContent-Length: 19\r\nConnection: close\r\n\r\n192.0.2.1\r\n10.0.0.1";
        socket.write_all(response.as_bytes()).unwrap();
    });

    let client = ResolutionClient::builder()
        .base_url(&format!("http://{}", addr))
        .build()
        .unwrap();

    let outcome = client.resolve_blocking("blocking.hns");
    assert_eq!(outcome.addresses(), ["192.0.2.1", "10.0.0.1"]);
    server.join().unwrap();
}
