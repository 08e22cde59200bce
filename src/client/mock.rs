//! Scripted transport for testing
//!
//! Replays queued outcomes in order and records every request it was asked
//! to send, so tests can assert on headers and attempt counts without a
//! real server.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::descriptor::RequestDescriptor;
use super::transport::{ApiResponse, Transport};
use crate::error::ApiError;

/// Transport that returns pre-scripted outcomes.
///
/// # Example
/// ```ignore
/// let transport = MockTransport::new()
///     .then_drop()
///     .then_ok(json!({ "cases": [] }));
/// ```
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<std::result::Result<ApiResponse, ApiError>>>,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, outcome: std::result::Result<ApiResponse, ApiError>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
        self
    }

    /// Queue a 200 response with `body`
    pub fn then_ok(self, body: Value) -> Self {
        self.push(Ok(ApiResponse {
            status: StatusCode::OK,
            body,
        }))
    }

    /// Queue a server rejection
    pub fn then_status(self, status: StatusCode, detail: Option<&str>) -> Self {
        self.push(Err(ApiError::Status {
            status,
            detail: detail.map(str::to_string),
        }))
    }

    /// Queue a dropped connection
    pub fn then_drop(self) -> Self {
        self.push(Err(ApiError::NoResponse("connection dropped".to_string())))
    }

    /// Queue a transport timeout
    pub fn then_timeout(self) -> Self {
        self.push(Err(ApiError::Timeout("operation timed out".to_string())))
    }

    /// Requests sent so far, as they looked on the wire
    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn attempts(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> std::result::Result<ApiResponse, ApiError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::NoResponse("mock script exhausted".to_string())))
    }
}
