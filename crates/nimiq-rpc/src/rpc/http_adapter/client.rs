use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::{header, Url};
use tracing::{debug, trace, Instrument, Span};

use crate::config::{ClientConfig, Credentials};
use crate::error::{Error, RpcError};

use super::super::RpcTransport;
use super::connection::parse_connection;
use super::protocol::{decode_response, JsonRpcRequest};

/// Nimiq JSON-RPC transport over HTTP(S).
///
/// Owns one `reqwest` session (connections are kept alive between calls)
/// and the correlation-id counter, which starts at 1 and is never reset.
/// Every call is logged inside this instance's span.
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    auth: Option<Credentials>,
    next_id: AtomicU64,
    span: Span,
}

impl HttpTransport {
    /// Create a transport for `url`, optionally with basic auth.
    pub fn new(url: &str, user: Option<&str>, pass: Option<&str>) -> Result<Self, Error> {
        let credentials = crate::config::resolve_credentials(user, pass)?;
        Self::with_config(&ClientConfig {
            url: url.to_owned(),
            credentials,
            ..ClientConfig::default()
        })
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, Error> {
        let url = parse_connection(&config.url)?;

        let mut builder = reqwest::Client::builder().tcp_nodelay(true);
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("build HTTP client: {e}")))?;

        let span = tracing::debug_span!("nimiq_rpc", url = %url);
        Ok(Self {
            client,
            url,
            auth: config.credentials.clone(),
            next_id: AtomicU64::new(1),
            span,
        })
    }

    /// Replace the span that every call of this instance is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        let id = self.next_request_id();
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = params.len(),
            "rpc call"
        );
        let req = JsonRpcRequest::new(id, method, params);
        trace!(rpc.id = id, rpc.method = method, request = ?req, "rpc request");

        let mut builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req);
        if let Some(ref auth) = self.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder.send().await.map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        if !status.is_success() {
            return Err(RpcError::HttpStatus { status, body });
        }

        decode_response(&req, &body)
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, Error> {
        self.rpc_call(method, params)
            .instrument(self.span.clone())
            .await
            .map_err(Error::from)
    }
}
