#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module provides test infrastructure that uses the REAL kernel code:
//! the same [`AppState`] and router as the binary, over an in-memory store.
//! Each [`TestApp`] owns its own store, so tests do not share resources.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use equipments_kernel::extension::{ExtensionClient, MemoryExtensionStore};
use equipments_kernel::{AppState, Config, routes};

/// Plugin endpoint base for the equipments plugin.
pub const PLUGIN_API: &str = "/apis/api.plugin.halo.run/v1alpha1/plugins/PluginEquipments";

/// Resource endpoint base for built-in kinds.
pub const RESOURCE_API: &str = "/apis/core.halo.run/v1alpha1";

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test application with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::with_store(config, Arc::new(MemoryExtensionStore::new()))
            .expect("Failed to initialize AppState");

        // Must match main.rs, minus the CORS and trace layers
        let router = routes::router().with_state(state.clone());

        Self { router, state }
    }

    /// Get the extension client backing the app.
    pub fn client(&self) -> &ExtensionClient {
        self.state.client()
    }

    /// Load the standard seed catalogue.
    pub async fn seed_catalogue(&self) {
        let json = equipments_test_utils::fixtures::catalogue().to_string();
        equipments_kernel::seed::load(self.client(), &json)
            .await
            .expect("Failed to seed catalogue");
    }

    /// Send a request to the app.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send_json("POST", uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> Response {
        self.send_json("PUT", uri, body).await
    }

    async fn send_json(&self, method: &str, uri: &str, body: &Value) -> Response {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// GET `uri`, assert 200 and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        json_body(response).await
    }
}

/// Read a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Read a response body as JSON.
pub async fn json_body(response: Response) -> Value {
    let body = body_string(response).await;
    serde_json::from_str(&body).unwrap_or_else(|e| panic!("invalid JSON ({e}): {body}"))
}
