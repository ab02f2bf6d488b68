//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use booking_api::config::ApiConfig;
use booking_api::http::HttpServer;
use booking_api::lifecycle::Shutdown;
use booking_api::MemoryBookingStore;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A server running on an ephemeral port against an in-memory table.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryBookingStore>,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ApiConfig::default()).await
    }

    pub async fn start_with(mut config: ApiConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        config.listener.bind_address = addr.to_string();

        let store = Arc::new(MemoryBookingStore::new());
        let server = HttpServer::new(config, store.clone());
        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();

        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            store,
            client,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// A body carrying every required field.
#[allow(dead_code)]
pub fn booking_body(title: &str, date: &str, time: &str) -> Value {
    json!({
        "title": title,
        "description": "Cut and colour",
        "date": date,
        "time": time,
        "phone_number": "555-0101"
    })
}
