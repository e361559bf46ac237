//! Shared utilities for integration testing.
//!
//! Mock upstreams are raw TCP servers so failure modes the gateway must
//! classify (reset connections, stalled sockets) can be produced exactly.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use defi_gateway::config::GatewayConfig;
use defi_gateway::http::HttpServer;
use defi_gateway::lifecycle::Shutdown;

/// Start the gateway on an ephemeral port; returns its address and the
/// shutdown handle keeping it alive.
pub async fn spawn_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Gateway config pointed at a mock upstream, with short timeouts and test
/// credentials.
pub fn test_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.aggregation_base_url = format!("http://{upstream}");
    config.upstream.news_base_url = format!("http://{upstream}");
    config.timeouts.upstream_secs = 2;
    config.timeouts.connect_secs = 2;
    config.credentials.api_auth_token = Some("test-token".into());
    config.credentials.news_api_key = Some("test-news-key".into());
    config
}

/// Record of what a mock upstream observed.
#[derive(Default)]
pub struct UpstreamLog {
    pub hits: AtomicU32,
    pub requests: Mutex<Vec<String>>,
}

impl UpstreamLog {
    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Lowercased request heads (request line + headers), oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock upstream that answers every request with a fixed status and
/// JSON body, recording what it saw.
pub async fn start_mock_upstream(
    status: u16,
    body: &'static str,
) -> (SocketAddr, Arc<UpstreamLog>) {
    start_programmable_upstream(move |_| (status, body.to_string())).await
}

/// Start a mock upstream whose response is computed from the request target.
pub async fn start_programmable_upstream<F>(f: F) -> (SocketAddr, Arc<UpstreamLog>)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(UpstreamLog::default());

    let f = Arc::new(f);
    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let f = f.clone();
            let log = task_log.clone();
            tokio::spawn(async move {
                let head = read_head(&mut socket).await;
                let target = head
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or_default()
                    .to_string();
                log.hits.fetch_add(1, Ordering::SeqCst);
                log.requests.lock().unwrap().push(head.to_lowercase());

                let (status, body) = f(&target);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, log)
}

/// Start a mock upstream that drops every connection without responding.
pub async fn start_reset_upstream() -> (SocketAddr, Arc<UpstreamLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(UpstreamLog::default());

    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            task_log.hits.fetch_add(1, Ordering::SeqCst);
            drop(socket);
        }
    });

    (addr, log)
}

/// Start a mock upstream that accepts and then never answers, to force the
/// gateway's upstream timeout.
pub async fn start_stalled_upstream() -> (SocketAddr, Arc<UpstreamLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(UpstreamLog::default());

    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            task_log.hits.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let _ = read_head(&mut socket).await;
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            });
        }
    });

    (addr, log)
}

/// Non-pooled client so each test request opens a fresh connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        201 => "201 Created",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}
