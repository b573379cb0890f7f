//! Shared test helpers for `avax-client-core` unit tests.
//!
//! [`FakeRequester`] stands in for a node: it returns scripted outcomes per
//! method and records every call it receives, so service-client tests can
//! assert on both the decoded reply and the params that went out.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RpcError;
use crate::rpc::EndpointRequester;

#[derive(Clone)]
enum Outcome {
    Reply(serde_json::Value),
    Remote { code: i64, message: String },
    Timeout,
}

impl Outcome {
    fn into_result(self) -> Result<serde_json::Value, RpcError> {
        match self {
            Outcome::Reply(value) => Ok(value),
            Outcome::Remote { code, message } => Err(RpcError::Remote { code, message }),
            Outcome::Timeout => Err(RpcError::Timeout(Duration::from_millis(1))),
        }
    }
}

/// Scripted in-memory requester.
///
/// Outcomes queued for a method are served in order; the last one repeats
/// for every later call. Methods with no script fail with a remote
/// "method not found" error.
#[derive(Default)]
pub struct FakeRequester {
    scripts: Mutex<HashMap<String, VecDeque<Outcome>>>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

impl FakeRequester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, method: &str, reply: serde_json::Value) -> Self {
        self.push(method, Outcome::Reply(reply))
    }

    pub fn with_remote_error(self, method: &str, code: i64, message: &str) -> Self {
        self.push(
            method,
            Outcome::Remote {
                code,
                message: message.to_owned(),
            },
        )
    }

    pub fn with_timeout(self, method: &str) -> Self {
        self.push(method, Outcome::Timeout)
    }

    /// Every `(method, params)` pair received so far, in call order.
    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn push(self, method: &str, outcome: Outcome) -> Self {
        self.scripts
            .lock()
            .expect("scripts lock poisoned")
            .entry(method.to_owned())
            .or_default()
            .push_back(outcome);
        self
    }
}

#[async_trait]
impl EndpointRequester for FakeRequester {
    async fn send_value(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push((method.to_owned(), params));

        let mut scripts = self.scripts.lock().expect("scripts lock poisoned");
        let outcome = match scripts.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        outcome
            .map(Outcome::into_result)
            .unwrap_or_else(|| {
                Err(RpcError::Remote {
                    code: -32601,
                    message: format!("method not found: {method}"),
                })
            })
    }
}

/// Encode `value` to JSON, decode it back and require an identical value.
pub fn assert_round_trip<T>(value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let encoded = serde_json::to_value(value).expect("must encode");
    let decoded: T = serde_json::from_value(encoded.clone())
        .unwrap_or_else(|e| panic!("must decode {encoded}: {e}"));
    assert_eq!(&decoded, value);
}
