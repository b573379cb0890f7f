mod cli;

use std::time::Duration;

use avax_client_core::formatting::{decode_hex, encode_hex};
use avax_client_core::{AvmClient, HealthClient, InfoClient};
use clap::Parser;
use eyre::{bail, WrapErr};
use serde::Serialize;

use cli::{AvmArgs, AvmCommand, Cli, Command, HealthCommand, InfoCommand};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let timeout = args.request_timeout();
    match args.command {
        Command::Info(cmd) => run_info(&args.uri, timeout, cmd).await,
        Command::Health(cmd) => run_health(&args.uri, timeout, cmd).await,
        Command::Avm(avm) => run_avm(&args.uri, timeout, avm).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

async fn run_info(uri: &str, timeout: Duration, cmd: InfoCommand) -> eyre::Result<()> {
    let info = InfoClient::new(uri, timeout).wrap_err("failed to create info client")?;
    match cmd {
        InfoCommand::NodeId => println!("{}", info.get_node_id().await?),
        InfoCommand::NetworkId => println!("{}", info.get_network_id().await?),
        InfoCommand::NetworkName => println!("{}", info.get_network_name().await?),
        InfoCommand::BlockchainId { alias } => {
            let id = info
                .get_blockchain_id(&alias)
                .await
                .wrap_err_with(|| format!("while resolving chain alias `{alias}`"))?;
            println!("{id}");
        }
        InfoCommand::Peers => print_json(&info.peers().await?)?,
        InfoCommand::IsBootstrapped { chain } => {
            println!("{}", info.is_bootstrapped(&chain).await?)
        }
    }
    Ok(())
}

async fn run_health(uri: &str, timeout: Duration, cmd: HealthCommand) -> eyre::Result<()> {
    let health = HealthClient::new(uri, timeout).wrap_err("failed to create health client")?;
    match cmd {
        HealthCommand::Liveness => print_json(&health.get_liveness().await?)?,
        HealthCommand::Await {
            checks,
            interval_ms,
        } => {
            let healthy = health
                .await_healthy(checks, Duration::from_millis(interval_ms))
                .await?;
            if !healthy {
                bail!("node at {uri} did not report healthy after {checks} checks");
            }
            tracing::info!(uri, "node is healthy");
        }
    }
    Ok(())
}

async fn run_avm(uri: &str, timeout: Duration, args: AvmArgs) -> eyre::Result<()> {
    let avm = AvmClient::new(uri, &args.chain, timeout)
        .wrap_err_with(|| format!("failed to create avm client for chain `{}`", args.chain))?;
    match args.command {
        AvmCommand::IssueTx { tx } => {
            let bytes = decode_hex(&tx).wrap_err("transaction must be 0x checksummed hex")?;
            println!("{}", avm.issue_tx(&bytes).await?);
        }
        AvmCommand::TxStatus { tx_id } => {
            let status = avm.get_tx_status(tx_id).await?;
            println!("{status:?}");
        }
        AvmCommand::GetTx { tx_id } => {
            let bytes = avm
                .get_tx(tx_id)
                .await
                .wrap_err_with(|| format!("while fetching transaction {tx_id}"))?;
            println!("{}", encode_hex(&bytes));
        }
        AvmCommand::Utxos {
            addresses,
            limit,
            start_address,
            start_utxo,
        } => {
            let (utxos, end) = avm
                .get_utxos(&addresses, limit, &start_address, &start_utxo)
                .await?;
            let rendered: Vec<String> = utxos.iter().map(|utxo| encode_hex(utxo)).collect();
            print_json(&serde_json::json!({"utxos": rendered, "endIndex": end}))?;
        }
        AvmCommand::Asset { asset_id } => {
            print_json(&avm.get_asset_description(&asset_id).await?)?
        }
        AvmCommand::Balance { address, asset_id } => {
            print_json(&avm.get_balance(&address, &asset_id).await?)?
        }
        AvmCommand::AllBalances { address } => {
            print_json(&avm.get_all_balances(&address).await?)?
        }
    }
    Ok(())
}
