use async_trait::async_trait;

use super::{HttpRequest, HttpResponse};
use crate::error::TransportError;

/// Performs one HTTP round trip.
///
/// Implementations return every response they receive, whatever its status;
/// status handling belongs to the caller.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
