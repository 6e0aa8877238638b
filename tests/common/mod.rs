//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use ant_router::config::{RouteConfig, ServerConfig};
use ant_router::http::HttpServer;
use ant_router::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<ServerConfig>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server for `config` on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(config: ServerConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (updates, config_updates) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        server.run(listener, config_updates, server_shutdown).await
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        updates,
        shutdown,
        handle,
    }
}

pub fn route(name: &str, method: &str, pattern: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        method: method.into(),
        pattern: pattern.into(),
        status: 200,
        body: name.into(),
        content_type: "text/plain; charset=utf-8".into(),
    }
}

pub fn config(routes: Vec<RouteConfig>) -> ServerConfig {
    ServerConfig {
        routes,
        ..ServerConfig::default()
    }
}
