//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which constructs a fresh [`AppContext`] (and
//! therefore an isolated empty store) per test. The [`with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

use std::net::SocketAddr;

use imagebin_core::config::Config;
use imagebin_server::context::AppContext;
use imagebin_server::router::build_router;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// fresh in-memory store.
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Create a new harness with default configuration and an empty store.
    pub fn new() -> Self {
        Self {
            ctx: AppContext::new(Config::default()),
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = build_router(harness.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// POST a multipart upload with the given payload to `/upload`.
pub async fn upload(
    addr: SocketAddr,
    bytes: Vec<u8>,
    filename: &str,
    mime: &str,
) -> reqwest::Response {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(mime)
        .expect("invalid test mime");
    let form = reqwest::multipart::Form::new().part("image", part);

    reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .expect("upload request failed")
}

/// Upload a small valid PNG payload and return the generated id.
pub async fn upload_png(addr: SocketAddr, filename: &str) -> String {
    let resp = upload(addr, b"fake png bytes".to_vec(), filename, "image/png").await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = resp.json().await.expect("metadata should be JSON");
    body["id"].as_str().expect("id should be a string").to_string()
}
