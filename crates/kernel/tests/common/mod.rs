#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] drives the REAL router and state, not mock implementations.
//! Every test builds its own app, so state never leaks between tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use quickform_kernel::{AppState, Config, routes};

/// Test application wrapper using the real kernel routes and state.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test application with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(&config);
        let router = routes::router().with_state(state.clone());
        Self { router, state }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.post_raw(uri, &body.to_string()).await
    }

    /// POST a raw body labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: &str) -> Response {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Create a form through the API and return its JSON.
    pub async fn create_form(&self, body: Value) -> Value {
        let response = self.post_json("/api/forms", &body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

/// Read a response body as a string.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Identifier of the field with the given label.
pub fn field_id(form: &Value, label: &str) -> String {
    form["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["label"] == label)
        .unwrap_or_else(|| panic!("no field labelled {label}"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}
