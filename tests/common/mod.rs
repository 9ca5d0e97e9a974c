// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use strava_activity_client::config::Config;
use strava_activity_client::error::{AppError, Result};
use strava_activity_client::models::AuthorizedSession;
use strava_activity_client::services::Authorizer;
use strava_activity_client::store::{KeyValueStore, MemoryStore};
use strava_activity_client::AppState;

/// A request received by the mock Strava server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

struct MockInner {
    activities: (StatusCode, Value),
    create: (StatusCode, Value),
    token: (StatusCode, Value),
    requests: Vec<RecordedRequest>,
}

/// In-process stand-in for the Strava API and token endpoint.
#[derive(Clone)]
pub struct MockStrava {
    inner: Arc<Mutex<MockInner>>,
}

#[allow(dead_code)]
impl MockStrava {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockInner {
                activities: (StatusCode::OK, json!([])),
                create: (StatusCode::CREATED, json!({ "id": 42 })),
                token: (
                    StatusCode::OK,
                    json!({
                        "access_token": "abc123",
                        "expires_at": 1_900_000_000,
                        "athlete": { "id": 7, "firstname": "Test", "lastname": "Athlete" }
                    }),
                ),
                requests: Vec::new(),
            })),
        }
    }

    pub fn set_activities(&self, status: StatusCode, body: Value) {
        self.inner.lock().unwrap().activities = (status, body);
    }

    pub fn set_create(&self, status: StatusCode, body: Value) {
        self.inner.lock().unwrap().create = (status, body);
    }

    pub fn set_token(&self, status: StatusCode, body: Value) {
        self.inner.lock().unwrap().token = (status, body);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Requests to `path` with `method`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Serve on an ephemeral loopback port and return the base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(handle).with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn handle(
    State(mock): State<MockStrava>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let mut inner = mock.inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let (status, body) = match (method, uri.path()) {
        (Method::GET, "/athlete/activities") => inner.activities.clone(),
        (Method::POST, "/activities") => inner.create.clone(),
        (Method::POST, "/oauth/token") => inner.token.clone(),
        _ => (StatusCode::NOT_FOUND, json!({ "message": "Record Not Found" })),
    };
    (status, Json(body))
}

/// Config pointing every Strava endpoint at `base_url`.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        token_url: format!("{}/oauth/token", base_url),
        auth_timeout_secs: 5,
        ..Config::default()
    }
}

/// App state with an in-memory session store.
#[allow(dead_code)]
pub fn test_state(base_url: &str) -> AppState {
    AppState::with_store(test_config(base_url), Arc::new(MemoryStore::new()))
}

/// Create a test app with a running mock server.
#[allow(dead_code)]
pub async fn create_test_app() -> (MockStrava, AppState) {
    let mock = MockStrava::new();
    let base_url = mock.spawn().await;
    (mock.clone(), test_state(&base_url))
}

/// Store that can be read but refuses writes and removals.
#[allow(dead_code)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

#[allow(dead_code)]
impl ReadOnlyStore {
    pub async fn with_token(token: &str) -> Self {
        let inner = MemoryStore::new();
        inner.set("token", token).await.unwrap();
        Self { inner }
    }
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(AppError::Storage("read-only store".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(AppError::Storage("read-only store".to_string()))
    }
}

/// Authorizer with a canned outcome.
#[allow(dead_code)]
pub struct FakeAuthorizer {
    outcome: std::result::Result<String, String>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeAuthorizer {
    pub fn granting(token: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(token.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn denying(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authorizer for FakeAuthorizer {
    async fn authorize(&self) -> Result<AuthorizedSession> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(token) => Ok(AuthorizedSession {
                access_token: token.clone(),
                athlete_id: None,
            }),
            Err(reason) => Err(AppError::Auth(reason.clone())),
        }
    }
}

/// One activity record in Strava's list format.
#[allow(dead_code)]
pub fn activity_json(id: u64, name: &str, heart_rate: Option<f64>) -> Value {
    json!({
        "id": id,
        "name": name,
        "distance": 10,
        "average_speed": 5,
        "type": "run",
        "max_speed": 12,
        "hasHeartRate": heart_rate.is_some(),
        "heart_rate": heart_rate,
    })
}
