use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    AddressArgs, AddressReply, AddressesReply, FormattedTx, GetTxArgs, SpendHeader, TxIdArgs,
    TxIdReply, UserPass,
};
use crate::error::CoreError;
use crate::formatting::{decode_hex, encode_hex, Encoding};
use crate::ids::{Id, Status};
use crate::json::{JsonU32, JsonU64};
use crate::rpc::{EndpointRequester, EndpointRequesterExt, HttpEndpointRequester};

use super::types::{
    AssetDescription, AssetIdArgs, AssetIdReply, Balance, BalanceReply, CreateAssetArgs,
    CreateNftAssetArgs, ExportArgs, ExportAvaxArgs, ExportKeyArgs, ExportKeyReply,
    GetAllBalancesReply, GetBalanceArgs, GetTxStatusReply, GetUtxosArgs, GetUtxosReply, Holder,
    ImportArgs, ImportKeyArgs, Index, MintArgs, MintNftArgs, Owners, SendArgs, SendMultipleArgs,
    SendNftArgs, SendOutput,
};

pub const AVM_NAMESPACE: &str = "avm";

/// Endpoint path of the chain with id or alias `chain`.
pub fn chain_path(chain: &str) -> String {
    format!("/ext/bc/{chain}")
}

/// Client for one asset VM chain (namespace `avm`).
///
/// Spending calls sign with keys held in the node's keystore, so they carry
/// the keystore user's credentials in a [`SpendHeader`].
pub struct AvmClient {
    requester: Arc<dyn EndpointRequester>,
}

impl AvmClient {
    /// Connect to chain `chain` (id or alias such as `X`) on the node at `uri`.
    pub fn new(uri: &str, chain: &str, request_timeout: Duration) -> Result<Self, CoreError> {
        let requester =
            HttpEndpointRequester::new(uri, &chain_path(chain), AVM_NAMESPACE, request_timeout)?;
        Ok(Self::with_requester(Arc::new(requester)))
    }

    pub fn with_requester(requester: Arc<dyn EndpointRequester>) -> Self {
        Self { requester }
    }

    async fn send_for_tx_id<P>(&self, method: &str, params: &P) -> Result<Id, CoreError>
    where
        P: serde::Serialize + Sync,
    {
        let reply: TxIdReply = self.requester.send_request(method, params).await?;
        Ok(reply.tx_id)
    }

    async fn send_for_asset_id<P>(&self, method: &str, params: &P) -> Result<Id, CoreError>
    where
        P: serde::Serialize + Sync,
    {
        let reply: AssetIdReply = self.requester.send_request(method, params).await?;
        Ok(reply.asset_id)
    }

    // ==========================================================================
    // Transactions
    // ==========================================================================

    /// Submit signed transaction bytes and return the transaction id.
    pub async fn issue_tx(&self, tx_bytes: &[u8]) -> Result<Id, CoreError> {
        let args = FormattedTx {
            tx: encode_hex(tx_bytes),
            encoding: Encoding::Hex,
        };
        self.send_for_tx_id("issueTx", &args).await
    }

    pub async fn get_tx_status(&self, tx_id: Id) -> Result<Status, CoreError> {
        let reply: GetTxStatusReply = self
            .requester
            .send_request("getTxStatus", &TxIdArgs { tx_id })
            .await?;
        Ok(reply.status)
    }

    /// Fetch the raw bytes of transaction `tx_id`.
    pub async fn get_tx(&self, tx_id: Id) -> Result<Vec<u8>, CoreError> {
        let args = GetTxArgs {
            tx_id,
            encoding: Encoding::Hex,
        };
        let reply: FormattedTx = self.requester.send_request("getTx", &args).await?;
        decode_hex(&reply.tx)
    }

    /// Fetch up to `limit` UTXOs referencing `addrs`, starting after the
    /// given cursor. Returns the raw UTXO bytes and the cursor to resume from.
    pub async fn get_utxos(
        &self,
        addrs: &[String],
        limit: u32,
        start_address: &str,
        start_utxo_id: &str,
    ) -> Result<(Vec<Vec<u8>>, Index), CoreError> {
        let args = GetUtxosArgs {
            addresses: addrs.to_vec(),
            limit: JsonU32(limit),
            start_index: Index {
                address: start_address.to_owned(),
                utxo: start_utxo_id.to_owned(),
            },
            encoding: Encoding::Hex,
        };
        let reply: GetUtxosReply = self.requester.send_request("getUTXOs", &args).await?;
        let utxos = reply
            .utxos
            .iter()
            .map(String::as_str)
            .map(decode_hex)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((utxos, reply.end_index))
    }

    // ==========================================================================
    // Assets and Balances
    // ==========================================================================

    pub async fn get_asset_description(
        &self,
        asset_id: &str,
    ) -> Result<AssetDescription, CoreError> {
        Ok(self
            .requester
            .send_request("getAssetDescription", &AssetIdArgs { asset_id })
            .await?)
    }

    pub async fn get_balance(
        &self,
        addr: &str,
        asset_id: &str,
    ) -> Result<BalanceReply, CoreError> {
        let args = GetBalanceArgs {
            address: addr,
            asset_id,
        };
        Ok(self.requester.send_request("getBalance", &args).await?)
    }

    pub async fn get_all_balances(&self, addr: &str) -> Result<Vec<Balance>, CoreError> {
        let args = AddressArgs {
            address: addr.to_owned(),
        };
        let reply: GetAllBalancesReply =
            self.requester.send_request("getAllBalances", &args).await?;
        Ok(reply.balances)
    }

    /// Create an asset whose entire supply is minted to `holders` at creation.
    pub async fn create_fixed_cap_asset(
        &self,
        header: SpendHeader,
        name: &str,
        symbol: &str,
        denomination: u8,
        holders: Vec<Holder>,
    ) -> Result<Id, CoreError> {
        let args = CreateAssetArgs {
            header,
            name: name.to_owned(),
            symbol: symbol.to_owned(),
            denomination,
            initial_holders: holders,
            minter_sets: Vec::new(),
        };
        self.send_for_asset_id("createFixedCapAsset", &args).await
    }

    /// Create an asset that the given minter sets may mint later.
    pub async fn create_variable_cap_asset(
        &self,
        header: SpendHeader,
        name: &str,
        symbol: &str,
        denomination: u8,
        minters: Vec<Owners>,
    ) -> Result<Id, CoreError> {
        let args = CreateAssetArgs {
            header,
            name: name.to_owned(),
            symbol: symbol.to_owned(),
            denomination,
            initial_holders: Vec::new(),
            minter_sets: minters,
        };
        self.send_for_asset_id("createVariableCapAsset", &args).await
    }

    pub async fn create_nft_asset(
        &self,
        header: SpendHeader,
        name: &str,
        symbol: &str,
        minters: Vec<Owners>,
    ) -> Result<Id, CoreError> {
        let args = CreateNftAssetArgs {
            header,
            name: name.to_owned(),
            symbol: symbol.to_owned(),
            minter_sets: minters,
        };
        self.send_for_asset_id("createNFTAsset", &args).await
    }

    // ==========================================================================
    // Keystore
    // ==========================================================================

    pub async fn create_address(&self, user: &UserPass) -> Result<String, CoreError> {
        let reply: AddressReply = self.requester.send_request("createAddress", user).await?;
        Ok(reply.address)
    }

    pub async fn list_addresses(&self, user: &UserPass) -> Result<Vec<String>, CoreError> {
        let reply: AddressesReply = self.requester.send_request("listAddresses", user).await?;
        Ok(reply.addresses)
    }

    pub async fn export_key(&self, user: UserPass, addr: &str) -> Result<String, CoreError> {
        let args = ExportKeyArgs {
            user,
            address: addr.to_owned(),
        };
        let reply: ExportKeyReply = self.requester.send_request("exportKey", &args).await?;
        Ok(reply.private_key)
    }

    /// Import a private key into the keystore user; returns its address.
    pub async fn import_key(
        &self,
        user: UserPass,
        private_key: &str,
    ) -> Result<String, CoreError> {
        let args = ImportKeyArgs {
            user,
            private_key: private_key.to_owned(),
        };
        let reply: AddressReply = self.requester.send_request("importKey", &args).await?;
        Ok(reply.address)
    }

    // ==========================================================================
    // Spending
    // ==========================================================================

    pub async fn send(
        &self,
        header: SpendHeader,
        amount: u64,
        asset_id: &str,
        to: &str,
    ) -> Result<Id, CoreError> {
        let args = SendArgs {
            header,
            output: SendOutput {
                amount: JsonU64(amount),
                asset_id: asset_id.to_owned(),
                to: to.to_owned(),
            },
        };
        self.send_for_tx_id("send", &args).await
    }

    /// Send several outputs in one transaction. Uses the `send` method with
    /// an `outputs` list, which the node accepts in place of a single output.
    pub async fn send_multiple(
        &self,
        header: SpendHeader,
        outputs: Vec<SendOutput>,
    ) -> Result<Id, CoreError> {
        let args = SendMultipleArgs { header, outputs };
        self.send_for_tx_id("send", &args).await
    }

    pub async fn mint(
        &self,
        header: SpendHeader,
        amount: u64,
        asset_id: &str,
        to: &str,
    ) -> Result<Id, CoreError> {
        let args = MintArgs {
            header,
            amount: JsonU64(amount),
            asset_id: asset_id.to_owned(),
            to: to.to_owned(),
        };
        self.send_for_tx_id("mint", &args).await
    }

    pub async fn send_nft(
        &self,
        header: SpendHeader,
        asset_id: &str,
        group_id: u32,
        to: &str,
    ) -> Result<Id, CoreError> {
        let args = SendNftArgs {
            header,
            asset_id: asset_id.to_owned(),
            group_id: JsonU32(group_id),
            to: to.to_owned(),
        };
        self.send_for_tx_id("sendNFT", &args).await
    }

    pub async fn mint_nft(
        &self,
        header: SpendHeader,
        asset_id: &str,
        payload: &[u8],
        to: &str,
    ) -> Result<Id, CoreError> {
        let args = MintNftArgs {
            header,
            asset_id: asset_id.to_owned(),
            payload: encode_hex(payload),
            encoding: Encoding::Hex,
            to: to.to_owned(),
        };
        self.send_for_tx_id("mintNFT", &args).await
    }

    // ==========================================================================
    // Cross-chain
    // ==========================================================================

    /// Import AVAX exported from `source_chain` to address `to`.
    pub async fn import_avax(
        &self,
        user: UserPass,
        to: &str,
        source_chain: &str,
    ) -> Result<Id, CoreError> {
        let args = ImportArgs {
            user,
            to: to.to_owned(),
            source_chain: source_chain.to_owned(),
        };
        self.send_for_tx_id("importAVAX", &args).await
    }

    /// Same call as [`AvmClient::import_avax`].
    pub async fn import(
        &self,
        user: UserPass,
        to: &str,
        source_chain: &str,
    ) -> Result<Id, CoreError> {
        self.import_avax(user, to, source_chain).await
    }

    pub async fn export_avax(
        &self,
        header: SpendHeader,
        amount: u64,
        to: &str,
    ) -> Result<Id, CoreError> {
        let args = ExportAvaxArgs {
            header,
            amount: JsonU64(amount),
            to: to.to_owned(),
        };
        self.send_for_tx_id("exportAVAX", &args).await
    }

    /// Export `amount` of `asset_id` to address `to` on another chain.
    pub async fn export(
        &self,
        header: SpendHeader,
        amount: u64,
        to: &str,
        asset_id: &str,
    ) -> Result<Id, CoreError> {
        let args = ExportArgs {
            base: ExportAvaxArgs {
                header,
                amount: JsonU64(amount),
                to: to.to_owned(),
            },
            asset_id: asset_id.to_owned(),
        };
        self.send_for_tx_id("exportAVAX", &args).await
    }
}
