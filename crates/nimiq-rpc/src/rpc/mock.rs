use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, RemoteError, RpcError};

use super::RpcTransport;

/// A recorded call: method name and positional params.
pub type RecordedCall = (String, Vec<serde_json::Value>);

/// A scripted transport for testing. Replies are consumed in call order;
/// every call is recorded, including ones that fail.
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<serde_json::Value, Error>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            replies: VecDeque::new(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }
}

pub struct MockTransportBuilder {
    replies: VecDeque<Result<serde_json::Value, Error>>,
}

impl MockTransportBuilder {
    pub fn reply(mut self, result: serde_json::Value) -> Self {
        self.replies.push_back(Ok(result));
        self
    }

    pub fn fail(mut self, error: Error) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    /// Queue a node-reported error with the given code and message.
    pub fn remote_error(self, method: &str, code: i64, message: &str) -> Self {
        self.fail(
            RpcError::from(RemoteError {
                method: method.to_owned(),
                params: Vec::new(),
                error: serde_json::json!({"code": code, "message": message}),
            })
            .into(),
        )
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            replies: Mutex::new(self.replies),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, Error> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((method.to_owned(), params));
        self.replies
            .lock()
            .expect("mock replies poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(RpcError::InvalidResponse(format!("mock has no reply for `{method}`")).into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_are_consumed_in_order_and_calls_recorded() {
        let mock = MockTransport::builder()
            .reply(json!(1))
            .remote_error("peerState", -32000, "unknown peer")
            .build();

        assert_eq!(mock.call("blockNumber", vec![]).await.expect("first"), json!(1));
        let err = mock
            .call("peerState", vec![json!("ws://peer")])
            .await
            .expect_err("second must fail");
        assert_eq!(err.as_remote().and_then(RemoteError::code), Some(-32000));
        assert!(mock.call("mining", vec![]).await.is_err());

        assert_eq!(mock.methods(), vec!["blockNumber", "peerState", "mining"]);
        assert_eq!(mock.calls()[1].1, vec![json!("ws://peer")]);
    }
}
