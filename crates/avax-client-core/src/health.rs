//! Client for the node health service (`/ext/health`, namespace `health`).

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::CoreError;
use crate::rpc::{EndpointRequester, EndpointRequesterExt, HttpEndpointRequester, NoParams};

pub const HEALTH_PATH: &str = "/ext/health";
pub const HEALTH_NAMESPACE: &str = "health";

/// Outcome of one named health check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Check-specific detail; any JSON shape.
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
    /// Time the check took, in nanoseconds.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub contiguous_failures: i64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time_of_first_failure: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivenessReply {
    #[serde(default)]
    pub checks: BTreeMap<String, CheckResult>,
    pub healthy: bool,
}

pub struct HealthClient {
    requester: Arc<dyn EndpointRequester>,
}

impl HealthClient {
    /// Connect to the health service of the node at `uri`.
    pub fn new(uri: &str, request_timeout: Duration) -> Result<Self, CoreError> {
        let requester =
            HttpEndpointRequester::new(uri, HEALTH_PATH, HEALTH_NAMESPACE, request_timeout)?;
        Ok(Self::with_requester(Arc::new(requester)))
    }

    pub fn with_requester(requester: Arc<dyn EndpointRequester>) -> Self {
        Self { requester }
    }

    pub async fn get_liveness(&self) -> Result<LivenessReply, CoreError> {
        Ok(self
            .requester
            .send_request("getLiveness", &NoParams {})
            .await?)
    }

    /// Poll liveness up to `checks` times, sleeping `interval` before each
    /// attempt, and return `true` as soon as the node reports healthy.
    ///
    /// Failed attempts count as "not yet healthy": if every attempt fails or
    /// reports unhealthy the result is `Ok(false)`, never the last error.
    pub async fn await_healthy(&self, checks: u32, interval: Duration) -> Result<bool, CoreError> {
        for attempt in 1..=checks {
            tokio::time::sleep(interval).await;
            match self.get_liveness().await {
                Ok(reply) if reply.healthy => return Ok(true),
                Ok(_) => debug!(attempt, checks, "node reported unhealthy"),
                Err(err) => debug!(attempt, checks, error = %err, "liveness check failed"),
            }
        }
        Ok(false)
    }
}
