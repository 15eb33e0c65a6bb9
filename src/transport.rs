//! Thin JSON transport over the backend REST API.
//!
//! Every call goes through [`HttpTransport`]: it owns the base URL and the
//! shared `reqwest` client, speaks `application/json` on every request, and
//! turns non-2xx responses into [`ApiError::Backend`] with the message the
//! backend put in its error body.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;

/// Error body shape the backend uses for rejections.
#[derive(Deserialize)]
struct BackendMessage {
    message: String,
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        // The backend expects the JSON content type even on body-less requests.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Shortcut used by tests and examples that only know an origin.
    pub fn from_base_url(base_url: &str) -> Result<Self, ApiError> {
        Self::new(&Config::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    /// PUT with no payload, used by status actions such as validate.
    pub async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::PUT, path, None).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "request");
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<BackendMessage>().await {
            Ok(parsed) => parsed.message,
            Err(_) => format!("backend returned {}", status),
        };
        tracing::debug!(status = status.as_u16(), message = %message, "backend rejected request");
        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}
