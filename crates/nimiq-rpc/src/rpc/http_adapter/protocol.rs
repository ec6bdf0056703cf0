use crate::error::{RemoteError, RpcError};

pub(super) const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
    pub(super) id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    pub(super) fn new(id: u64, method: &'a str, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id,
        }
    }
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    pub(super) id: serde_json::Value,
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Classify a response body against the request it answers.
///
/// Checks happen in a fixed order: the body must parse as an envelope,
/// its id must equal the request id, and only then is a non-null `error`
/// member surfaced as a remote error. A missing `result` reads as `null`.
pub(super) fn decode_response(
    request: &JsonRpcRequest<'_>,
    body: &str,
) -> Result<serde_json::Value, RpcError> {
    let decoded: JsonRpcResponse = serde_json::from_str(body).map_err(|e| {
        RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={body}"))
    })?;

    if decoded.id.as_u64() != Some(request.id) {
        return Err(RpcError::IdMismatch {
            expected: request.id,
            received: decoded.id,
        });
    }

    if let Some(error) = decoded.error {
        return Err(RemoteError {
            method: request.method.to_owned(),
            params: request.params.clone(),
            error,
        }
        .into());
    }

    Ok(decoded.result.unwrap_or(serde_json::Value::Null))
}
