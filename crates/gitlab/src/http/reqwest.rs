use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{HttpExecutor, HttpRequest, HttpResponse, Method};
use crate::error::TransportError;

pub const USER_AGENT: &str = concat!("repofs/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        let client = match build_client() {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to configure HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            }
        };
        Self { client }
    }
}

fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidRequest(format!("{}: {}", request.url, e)))?;

        let mut builder = self.client.request(request.method.into(), url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body {
            builder = builder
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| network_error(&request.url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(&request.url, e))?;

        Ok(HttpResponse { status, body })
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn network_error(url: &str, error: reqwest::Error) -> TransportError {
    TransportError::Network {
        url: url.to_string(),
        message: error.to_string(),
    }
}
