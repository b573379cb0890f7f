//! Endpoint requester abstraction.
//!
//! Defines the [`EndpointRequester`] trait, the typed [`EndpointRequesterExt`]
//! helper every service client calls through, and the HTTP JSON-RPC
//! implementation ([`HttpEndpointRequester`]).

mod http_adapter;

pub use http_adapter::{HttpEndpointRequester, RequesterConfig};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RpcError;

/// Parameters for calls that take no arguments. Encodes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

/// Name-addressed request/response transport bound to one service.
///
/// Implementations qualify `method` with their namespace, ship the params,
/// and return the raw `result` value. They hold no per-call state and must
/// be safe to share between concurrent callers.
#[async_trait]
pub trait EndpointRequester: Send + Sync {
    /// Send one call and return the undecoded result payload.
    async fn send_value(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError>;
}

/// Typed wrapper over [`EndpointRequester::send_value`].
///
/// Params are encoded before anything is sent, so an unencodable value never
/// reaches the transport.
#[async_trait]
pub trait EndpointRequesterExt: EndpointRequester {
    async fn send_request<P, R>(&self, method: &str, params: &P) -> Result<R, RpcError>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params).map_err(RpcError::Encoding)?;
        let raw = self.send_value(method, params).await?;
        if raw.is_null() {
            return Err(RpcError::Decoding(serde::de::Error::custom(
                "response carried neither result nor error",
            )));
        }
        serde_json::from_value(raw).map_err(RpcError::Decoding)
    }
}

impl<T: EndpointRequester + ?Sized> EndpointRequesterExt for T {}
