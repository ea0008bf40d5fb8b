//! The seam between request builders and the HTTP layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::route::CompiledRoute;

/// Header carrying the audit-log reason for moderation actions.
pub const AUDIT_LOG_REASON_HEADER: &str = "X-Audit-Log-Reason";

/// A fully prepared request.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub route: CompiledRoute,
    pub body: Option<Value>,
    /// Sent as [`AUDIT_LOG_REASON_HEADER`] when present
    pub reason: Option<String>,
}

impl RestRequest {
    pub fn new(route: CompiledRoute) -> Self {
        Self { route, body: None, reason: None }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }
}

/// Sends a [`RestRequest`] and yields the decoded JSON body.
///
/// Implementations report non-2xx responses as
/// [`ParleyError::Api`](crate::ParleyError::Api) and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RestRequest) -> Result<Value>;
}
