use std::time::Duration;

use avax_client_core::Id;
use clap::{Args, Parser, Subcommand};

/// Query an Avalanche node's info, health and AVM APIs.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Base URI of the node's HTTP API.
    #[arg(long, default_value = "http://127.0.0.1:9650", env = "AVAX_URI", global = true)]
    pub uri: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value = "30", env = "AVAX_TIMEOUT_SECS", global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Node info service (`/ext/info`).
    #[command(subcommand)]
    Info(InfoCommand),

    /// Node health service (`/ext/health`).
    #[command(subcommand)]
    Health(HealthCommand),

    /// Asset VM chain (`/ext/bc/<chain>`).
    Avm(AvmArgs),
}

#[derive(Subcommand)]
pub enum InfoCommand {
    NodeId,
    NetworkId,
    NetworkName,
    /// Resolve a chain alias to its blockchain id.
    BlockchainId { alias: String },
    Peers,
    IsBootstrapped { chain: String },
}

#[derive(Subcommand)]
pub enum HealthCommand {
    Liveness,
    /// Poll liveness until the node reports healthy.
    Await {
        /// Maximum number of liveness checks.
        #[arg(long, default_value = "10")]
        checks: u32,

        /// Pause before each check, in milliseconds.
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
    },
}

#[derive(Args)]
pub struct AvmArgs {
    /// Chain id or alias.
    #[arg(long, default_value = "X")]
    pub chain: String,

    #[command(subcommand)]
    pub command: AvmCommand,
}

#[derive(Subcommand)]
pub enum AvmCommand {
    /// Submit a signed transaction given as `0x` checksummed hex.
    IssueTx { tx: String },
    TxStatus { tx_id: Id },
    /// Print a transaction as `0x` checksummed hex.
    GetTx { tx_id: Id },
    Utxos {
        #[arg(required = true)]
        addresses: Vec<String>,

        #[arg(long, default_value = "1024")]
        limit: u32,

        #[arg(long, default_value = "")]
        start_address: String,

        #[arg(long, default_value = "")]
        start_utxo: String,
    },
    Asset { asset_id: String },
    Balance { address: String, asset_id: String },
    AllBalances { address: String },
}
