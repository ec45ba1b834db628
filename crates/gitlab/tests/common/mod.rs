#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use repofs_gitlab::http::{HttpExecutor, HttpRequest, HttpResponse};
use repofs_gitlab::{ClientConfig, GitlabAdapter, GitlabClient, TransportError};

/// Replays queued responses in order and records every request it sees.
/// An empty queue answers `200` with an empty JSON object.
#[derive(Default)]
pub struct RecordingExecutor {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: impl Into<Bytes>) {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.into(),
        });
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond(status, body.to_string());
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpExecutor for RecordingExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let response = self.responses.lock().unwrap().pop_front();
        Ok(response.unwrap_or(HttpResponse {
            status: 200,
            body: Bytes::from_static(b"{}"),
        }))
    }
}

/// Always fails as if the host were unreachable.
pub struct UnreachableExecutor;

#[async_trait]
impl HttpExecutor for UnreachableExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network {
            url: request.url,
            message: "connection refused".to_string(),
        })
    }
}

pub const BASE: &str = "https://gitlab.example.com/api/v4/projects/42/repository";

pub fn test_config() -> ClientConfig {
    ClientConfig::new("tok", "42", "main", "https://gitlab.example.com/")
}

pub fn test_client() -> (GitlabClient, Arc<RecordingExecutor>) {
    let executor = RecordingExecutor::new();
    let client = GitlabClient::with_executor(test_config(), executor.clone());
    (client, executor)
}

pub fn test_adapter() -> (GitlabAdapter, Arc<RecordingExecutor>) {
    let (client, executor) = test_client();
    (GitlabAdapter::new(client), executor)
}

pub fn form(request: &HttpRequest) -> Vec<(String, String)> {
    request.form_pairs()
}

pub fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}
