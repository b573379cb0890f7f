//! JSON-RPC requester for Avalanche-style HTTP endpoints.
//!
//! Implements [`EndpointRequester`](super::EndpointRequester) using
//! `reqwest`, with per-call timeouts, namespace-qualified method names and
//! optional request pacing.

mod client;
mod connection;
mod protocol;

pub use client::{HttpEndpointRequester, RequesterConfig};
