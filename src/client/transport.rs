//! Transport layer: turns a descriptor into one HTTP exchange

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::descriptor::{RequestBody, RequestDescriptor};
use crate::error::{ApiError, Result};

/// Successful API response. The payload is passed on without validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Sends a single request; no retries, no hooks
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> std::result::Result<ApiResponse, ApiError>;
}

/// HTTP transport backed by `reqwest`
pub struct ReqwestTransport {
    http: HttpClient,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` (host plus API prefix).
    ///
    /// Without a timeout, requests wait as long as the connection allows.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::from)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> std::result::Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path);
        debug!("Sending {} {}", request.method, url);

        let builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;
        let body = parse_body(&text);

        if status.is_success() {
            Ok(ApiResponse { status, body })
        } else {
            debug!("{} {} rejected with {}", request.method, url, status);
            Err(ApiError::Status {
                status,
                detail: extract_detail(&body),
            })
        }
    }
}

/// Parse a response body, keeping non-JSON text as a string
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Pull the server-provided `detail` out of an error body
fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        // Validation errors arrive as structured lists
        other => Some(other.to_string()),
    }
}
