//! Test support: an in-process HTTP API that records every request
//!
//! Routes are registered per (method, path) with a canned status and body.
//! Anything unregistered answers 404 `{"message":"Not found"}`.

use crate::api::ApiClient;
use crate::config::Config;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Response, StatusCode, Uri};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded request
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    /// Raw `Authorization` header
    pub auth: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), Reply>>,
    hits: Mutex<Vec<Hit>>,
}

pub struct MockServer {
    pub url: String,
    state: Arc<MockState>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response<Body> {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(Hit {
        method: method.to_string(),
        path: path.clone(),
        auth: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let reply = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned()
        .unwrap_or(Reply {
            status: 404,
            body: r#"{"message":"Not found"}"#.to_string(),
            delay: None,
        });

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(reply.body))
        .unwrap()
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url, state, task }
    }

    fn insert(&self, method: &str, path: &str, reply: Reply) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), reply);
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.on_raw(method, path, status, &body.to_string())
    }

    /// Answer with a raw body string
    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.insert(
            method,
            path,
            Reply {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Answer after `delay`
    pub fn on_delayed(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
        delay: Duration,
    ) -> &Self {
        self.insert(
            method,
            path,
            Reply {
                status,
                body: body.to_string(),
                delay: Some(delay),
            },
        );
        self
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    /// Number of requests seen for `method path`
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|h| h.method == method && h.path == path)
            .count()
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api_url = self.url.clone();
        config.request_timeout_secs = 5;
        config
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).unwrap()
    }
}

/// Config pointing at a port nothing listens on
pub fn unreachable_config() -> Config {
    let mut config = Config::default();
    config.api_url = "http://127.0.0.1:1".to_string();
    config.request_timeout_secs = 2;
    config
}
