use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, Url};
use tracing::{debug, trace};

use crate::error::{CoreError, RpcError};

use super::super::EndpointRequester;
use super::connection::endpoint_url;
use super::protocol::{check_response_id, parse_jsonrpc_error, JsonRpcRequest, JsonRpcResponse};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Transport settings for an [`HttpEndpointRequester`].
#[derive(Debug, Clone)]
pub struct RequesterConfig {
    /// Upper bound for one call, from waiting for a pacing permit to reading
    /// the whole response body.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// If set, outbound HTTP requests are paced to this rate. Calls wait for
    /// a permit; nothing is dropped or retried.
    pub requests_per_second: Option<u32>,
}

impl RequesterConfig {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT.min(request_timeout),
            requests_per_second: None,
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = Some(limit);
        self
    }
}

/// JSON-RPC 2.0 requester for one service endpoint over HTTP(S).
///
/// Every call is a `POST` of a single envelope to `base + path` with the
/// method qualified as `namespace.method`. The only state shared between
/// calls is the request-id counter and the `reqwest` connection pool, both
/// safe under concurrent use.
pub struct HttpEndpointRequester {
    client: reqwest::Client,
    url: Url,
    namespace: String,
    request_timeout: Duration,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpEndpointRequester {
    /// Create a requester for `uri` + `path` with default transport settings
    /// and the given per-call timeout.
    pub fn new(
        uri: &str,
        path: &str,
        namespace: &str,
        request_timeout: Duration,
    ) -> Result<Self, CoreError> {
        Self::with_config(uri, path, namespace, RequesterConfig::new(request_timeout))
    }

    pub fn with_config(
        uri: &str,
        path: &str,
        namespace: &str,
        config: RequesterConfig,
    ) -> Result<Self, CoreError> {
        if namespace.is_empty() {
            return Err(CoreError::InvalidConfig(
                "requester namespace must not be empty".to_owned(),
            ));
        }
        if config.request_timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "request timeout must be greater than zero".to_owned(),
            ));
        }
        let url = endpoint_url(uri, path)?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        let limiter = match config.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::InvalidConfig("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            url,
            namespace: namespace.to_owned(),
            request_timeout: config.request_timeout,
            limiter,
            next_id: AtomicU64::new(initial_request_id()),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn reserve_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> RpcError {
        if err.is_timeout() {
            RpcError::Timeout(self.request_timeout)
        } else {
            RpcError::Transport(err)
        }
    }
}

impl std::fmt::Debug for HttpEndpointRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEndpointRequester")
            .field("url", &self.url.as_str())
            .field("namespace", &self.namespace)
            .field("request_timeout", &self.request_timeout)
            .field("paced", &self.limiter.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EndpointRequester for HttpEndpointRequester {
    /// The timeout spans the whole call, including any wait for a pacing
    /// permit.
    async fn send_value(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        tokio::time::timeout(self.request_timeout, self.rpc_call(method, params))
            .await
            .map_err(|_| RpcError::Timeout(self.request_timeout))?
    }
}

impl HttpEndpointRequester {
    async fn rpc_call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        self.wait_for_rate_limit().await;
        let id = self.reserve_request_id();
        let qualified = format!("{}.{}", self.namespace, method);
        debug!(rpc.id = id, rpc.method = %qualified, url = %self.url, "rpc call");

        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method: &qualified,
            params,
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(
            rpc.id = id,
            rpc.method = %qualified,
            %status,
            body_len = body.len(),
            "rpc response"
        );
        trace!(rpc.id = id, rpc.method = %qualified, body = %body, "rpc response body");

        let decoded: JsonRpcResponse = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(_) if !status.is_success() => {
                return Err(RpcError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }
            Err(e) => {
                return Err(RpcError::InvalidResponse(format!(
                    "decode JSON-RPC response: {e}; body={body}"
                )));
            }
        };

        // Servers may answer unparseable requests with a null id, so the
        // error payload is checked before the id.
        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }
        if !status.is_success() {
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        check_response_id(&decoded.id, id)?;

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
