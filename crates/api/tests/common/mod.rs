#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use api::{app, AppState, CompletionBridge};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use brain_core::Brain;
use credentials::CredentialService;
use database::Database;
use mock_brain::EchoBrain;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    /// App backed by an echoing brain that prefixes replies with `AI: `.
    pub async fn new() -> Self {
        Self::with_brain(Some(Arc::new(EchoBrain::with_prefix("AI: "))), Duration::from_secs(5)).await
    }

    pub async fn with_brain(brain: Option<Arc<dyn Brain>>, timeout: Duration) -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let credentials = CredentialService::new(SECRET, CredentialService::default_ttl());
        let state = AppState::new(db.clone(), credentials, CompletionBridge::new(brain, timeout));

        Self {
            router: app(state),
            db,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn signup(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "name": "Test User", "email": email, "password": password, "age": 30 })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Sign up and log in, returning the bearer token.
    pub async fn token_for(&self, email: &str) -> String {
        let (status, _) = self.signup(email, "hunter2").await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(email, "hunter2").await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_conversation(&self, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/api/conversations", Some(token), Some(body))
            .await
    }
}

pub fn user_message(text: &str) -> Value {
    json!({ "text": text, "isUser": true })
}
