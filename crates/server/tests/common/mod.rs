//! Common test utilities for E2E testing with mocks.
//!
//! Builds an in-process router over a temporary template directory, with
//! an optional mock AI generator injected.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dorkforge_core::{
    testing::MockDorkGenerator, Config, DorkEngine, DorkGenerator, TemplateRepository,
};
use dorkforge_server::state::AppState;

/// Re-export fixtures for test convenience
pub use dorkforge_core::testing::fixtures;

/// Test fixture for E2E testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_generate() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/generate", json!({
///         "category": "login_pages",
///         "domain": "example.com"
///     })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock AI generator, present when enabled in [`TestConfig`]
    pub ai: Option<MockDorkGenerator>,
    /// Temporary template directory
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Raw body, for non-JSON responses such as exports
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture without AI.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fixtures::write_sample_templates(temp_dir.path()).expect("Failed to write templates");

        let mut config = Config::default();
        config.templates.dir = temp_dir.path().to_path_buf();
        if let Some(engine) = test_config.default_engine {
            config.generation.default_engine = engine.to_string();
        }

        let repository =
            TemplateRepository::new(temp_dir.path()).expect("Failed to open template dir");
        let engine = DorkEngine::new(Arc::new(repository), true);

        let ai = test_config.enable_ai.then(MockDorkGenerator::new);
        let generator = ai
            .clone()
            .map(|mock| Arc::new(mock) as Arc<dyn DorkGenerator>);

        let state = Arc::new(AppState::new(config, engine, generator));
        let router = dorkforge_server::api::create_router(state);

        Self {
            router,
            ai,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Inject a mock AI generator
    pub enable_ai: bool,
    /// Override `generation.default_engine`
    pub default_engine: Option<&'static str>,
}

impl TestConfig {
    /// Create config with the mock AI generator enabled.
    pub fn with_ai() -> Self {
        Self {
            enable_ai: true,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
