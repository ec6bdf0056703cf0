use std::fmt;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("RPC communication failure: {0}")]
    Rpc(#[from] RpcError),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid response data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The RPC failure class, if this error came from the transport layer.
    pub fn rpc_kind(&self) -> Option<RpcErrorKind> {
        match self {
            Error::Rpc(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// The node-reported error object, if the node rejected the call.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Error::Rpc(RpcError::Remote(remote)) => Some(remote.as_ref()),
            _ => None,
        }
    }
}

/// Failures of a single JSON-RPC round trip.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("JSON-RPC response id mismatch: expected {expected}, received {received}")]
    IdMismatch {
        expected: u64,
        received: serde_json::Value,
    },

    #[error(transparent)]
    Remote(Box<RemoteError>),
}

/// Coarse classification of an [`RpcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorKind {
    /// The HTTP exchange itself failed (connection fault or non-success status).
    Transport,
    /// The node answered, but not with a well-formed, correlated envelope.
    Protocol,
    /// The node answered with a JSON-RPC error object.
    Remote,
}

impl RpcError {
    pub fn kind(&self) -> RpcErrorKind {
        match self {
            RpcError::Transport(_) | RpcError::HttpStatus { .. } => RpcErrorKind::Transport,
            RpcError::InvalidResponse(_) | RpcError::IdMismatch { .. } => RpcErrorKind::Protocol,
            RpcError::Remote(_) => RpcErrorKind::Remote,
        }
    }
}

/// An error reported by the node, together with the call that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    pub method: String,
    pub params: Vec<serde_json::Value>,
    /// The `error` member of the response, verbatim.
    pub error: serde_json::Value,
}

impl RemoteError {
    pub fn code(&self) -> Option<i64> {
        self.error.get("code").and_then(serde_json::Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.error.get("message").and_then(serde_json::Value::as_str)
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.error.get("data").filter(|data| !data.is_null())
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => {
                write!(f, "remote error in `{}` ({code}): {message}", self.method)
            }
            _ => write!(f, "remote error in `{}`: {}", self.method, self.error),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<RemoteError> for RpcError {
    fn from(err: RemoteError) -> Self {
        RpcError::Remote(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(error: serde_json::Value) -> RemoteError {
        RemoteError {
            method: "getBalance".to_owned(),
            params: vec![serde_json::json!("NQ07 0000")],
            error,
        }
    }

    #[test]
    fn remote_error_accessors_read_standard_shape() {
        let err = remote(serde_json::json!({
            "code": -32601,
            "message": "Method not found",
            "data": {"hint": "typo"}
        }));
        assert_eq!(err.code(), Some(-32601));
        assert_eq!(err.message(), Some("Method not found"));
        assert_eq!(err.data(), Some(&serde_json::json!({"hint": "typo"})));
        assert_eq!(
            err.to_string(),
            "remote error in `getBalance` (-32601): Method not found"
        );
    }

    #[test]
    fn remote_error_display_falls_back_to_raw_object() {
        let err = remote(serde_json::json!("boom"));
        assert_eq!(err.code(), None);
        assert_eq!(err.data(), None);
        assert_eq!(err.to_string(), "remote error in `getBalance`: \"boom\"");
    }

    #[test]
    fn rpc_error_kinds_follow_taxonomy() {
        let mismatch = RpcError::IdMismatch {
            expected: 1,
            received: serde_json::json!(2),
        };
        assert_eq!(mismatch.kind(), RpcErrorKind::Protocol);
        assert_eq!(
            RpcError::InvalidResponse("x".into()).kind(),
            RpcErrorKind::Protocol
        );
        assert_eq!(
            RpcError::HttpStatus {
                status: StatusCode::UNAUTHORIZED,
                body: String::new(),
            }
            .kind(),
            RpcErrorKind::Transport
        );
        let err: Error = RpcError::from(remote(serde_json::json!({"code": 1}))).into();
        assert_eq!(err.rpc_kind(), Some(RpcErrorKind::Remote));
        assert!(err.as_remote().is_some());
        assert_eq!(Error::InvalidAmount("x".into()).rpc_kind(), None);
    }
}
