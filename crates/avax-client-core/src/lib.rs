pub mod api;
pub mod avm;
pub mod error;
pub mod formatting;
pub mod health;
pub mod ids;
pub mod info;
pub mod json;
pub mod rpc;
#[cfg(test)]
mod test_util;

pub use avm::AvmClient;
pub use error::{CoreError, RpcError};
pub use health::HealthClient;
pub use ids::{Id, Status};
pub use info::InfoClient;
pub use rpc::{EndpointRequester, EndpointRequesterExt, HttpEndpointRequester, RequesterConfig};
