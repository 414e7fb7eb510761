// Marketplace REST client
//
// One reqwest client, one base URL, and the endpoint table from config. Every
// page goes through here so the bearer header, status handling and the
// array-or-envelope normalization live in a single place.

pub mod auth;
mod envelope;
mod error;

pub use envelope::{decode_items, normalize_list, unwrap_data};
pub use error::ApiError;

use crate::config::{Config, Endpoints};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Cloneable handle; clones share the connection pool
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    endpoints: Arc<Endpoints>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("API client targeting {}", config.api_url);

        Ok(Self {
            http,
            base_url: Arc::from(config.api_url.trim_end_matches('/')),
            endpoints: Arc::new(config.endpoints.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Read a response: non-2xx becomes `ApiError::Status`, empty bodies are `null`
    async fn read_body(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: envelope::error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET returning raw JSON
    pub async fn get_value(&self, path: &str, token: Option<&str>) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = Self::authorize(self.http.get(&url), token).send().await?;
        Self::read_body(response).await
    }

    /// GET a list endpoint, tolerating both the bare and the `data` envelope shape
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.get_value(path, token).await?;
        Ok(decode_items(normalize_list(body), path))
    }

    /// GET a single JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let body = self.get_value(path, token).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST a JSON body, returning whatever JSON came back
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = Self::authorize(self.http.post(&url), token)
            .json(body)
            .send()
            .await?;
        Self::read_body(response).await
    }
}
