//! Client for the node info service (`/ext/info`, namespace `info`).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::CoreError;
use crate::json::JsonU64;
use crate::rpc::{EndpointRequester, EndpointRequesterExt, HttpEndpointRequester, NoParams};

pub const INFO_PATH: &str = "/ext/info";
pub const INFO_NAMESPACE: &str = "info";

// ==============================================================================
// Wire Types
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
struct NodeIdReply {
    #[serde(rename = "nodeID")]
    node_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NetworkIdReply {
    #[serde(rename = "networkID")]
    network_id: JsonU64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkNameReply {
    network_name: String,
}

#[derive(Debug, Clone, Serialize)]
struct BlockchainIdArgs<'a> {
    alias: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct BlockchainIdReply {
    #[serde(rename = "blockchainID")]
    blockchain_id: String,
}

#[derive(Debug, Clone, Serialize)]
struct IsBootstrappedArgs<'a> {
    chain: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IsBootstrappedReply {
    is_bootstrapped: bool,
}

/// A connected peer as reported by `info.peers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub ip: String,
    #[serde(rename = "publicIP")]
    pub public_ip: String,
    #[serde(rename = "nodeID")]
    pub node_id: String,
    pub version: String,
    #[serde(rename = "lastSent", with = "time::serde::rfc3339")]
    pub last_sent: OffsetDateTime,
    #[serde(rename = "lastReceived", with = "time::serde::rfc3339")]
    pub last_received: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
struct PeersReply {
    #[serde(default)]
    peers: Option<Vec<Peer>>,
}

// ==============================================================================
// Client
// ==============================================================================

pub struct InfoClient {
    requester: Arc<dyn EndpointRequester>,
}

impl InfoClient {
    /// Connect to the info service of the node at `uri`.
    pub fn new(uri: &str, request_timeout: Duration) -> Result<Self, CoreError> {
        let requester =
            HttpEndpointRequester::new(uri, INFO_PATH, INFO_NAMESPACE, request_timeout)?;
        Ok(Self::with_requester(Arc::new(requester)))
    }

    pub fn with_requester(requester: Arc<dyn EndpointRequester>) -> Self {
        Self { requester }
    }

    pub async fn get_node_id(&self) -> Result<String, CoreError> {
        let reply: NodeIdReply = self.requester.send_request("getNodeID", &NoParams {}).await?;
        Ok(reply.node_id)
    }

    pub async fn get_network_id(&self) -> Result<u32, CoreError> {
        let reply: NetworkIdReply = self
            .requester
            .send_request("getNetworkID", &NoParams {})
            .await?;
        u32::try_from(reply.network_id.0).map_err(|_| {
            CoreError::InvalidData(format!("network id out of range: {}", reply.network_id))
        })
    }

    pub async fn get_network_name(&self) -> Result<String, CoreError> {
        let reply: NetworkNameReply = self
            .requester
            .send_request("getNetworkName", &NoParams {})
            .await?;
        Ok(reply.network_name)
    }

    /// Resolve a chain alias (for example `X`) to its blockchain id.
    pub async fn get_blockchain_id(&self, alias: &str) -> Result<String, CoreError> {
        let reply: BlockchainIdReply = self
            .requester
            .send_request("getBlockchainID", &BlockchainIdArgs { alias })
            .await?;
        Ok(reply.blockchain_id)
    }

    pub async fn peers(&self) -> Result<Vec<Peer>, CoreError> {
        let reply: PeersReply = self.requester.send_request("peers", &NoParams {}).await?;
        Ok(reply.peers.unwrap_or_default())
    }

    pub async fn is_bootstrapped(&self, chain: &str) -> Result<bool, CoreError> {
        let reply: IsBootstrappedReply = self
            .requester
            .send_request("isBootstrapped", &IsBootstrappedArgs { chain })
            .await?;
        Ok(reply.is_bootstrapped)
    }
}
