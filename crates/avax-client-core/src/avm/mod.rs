//! Client for asset VM chains (`/ext/bc/<chain>`, namespace `avm`).

mod client;
pub mod types;

pub use client::{chain_path, AvmClient, AVM_NAMESPACE};
pub use types::{
    AssetDescription, Balance, BalanceReply, Holder, Index, Owners, SendOutput, UtxoId,
};
