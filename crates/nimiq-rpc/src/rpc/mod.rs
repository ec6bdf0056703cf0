//! JSON-RPC transport layer.
//!
//! Defines the [`RpcTransport`] trait and provides the HTTP implementation
//! ([`HttpTransport`]) plus a scripted test double (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;

pub use http_adapter::HttpTransport;

use async_trait::async_trait;

use crate::error::Error;

/// One JSON-RPC 2.0 call with positional parameters.
///
/// Implementations assign correlation ids, validate the response envelope
/// and return the `result` member verbatim (which may be `null`). Failures
/// are never retried.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, Error>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, Error> {
        (**self).call(method, params).await
    }
}
