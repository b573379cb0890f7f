//! Argument and reply types for the `avm` namespace.
//!
//! Field names follow the node's JSON exactly; numeric amounts use the quoted
//! integer wrappers from [`crate::json`].

use serde::{Deserialize, Serialize};

use crate::api::{SpendHeader, UserPass};
use crate::formatting::Encoding;
use crate::ids::{Id, Status};
use crate::json::{JsonU32, JsonU64, JsonU8};

// ==============================================================================
// Shared Shapes
// ==============================================================================

/// Pagination cursor for `getUTXOs`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Index {
    pub address: String,
    pub utxo: String,
}

/// One recipient of an asset at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub amount: JsonU64,
    pub address: String,
}

/// A minting group: any `threshold` of `minters` may mint together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owners {
    pub threshold: JsonU32,
    pub minters: Vec<String>,
}

/// One output of a multi-output send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutput {
    pub amount: JsonU64,
    #[serde(rename = "assetID")]
    pub asset_id: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoId {
    #[serde(rename = "txID")]
    pub tx_id: Id,
    pub output_index: u32,
}

// ==============================================================================
// Transactions
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GetTxStatusReply {
    pub(crate) status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetUtxosArgs {
    pub(crate) addresses: Vec<String>,
    pub(crate) limit: JsonU32,
    pub(crate) start_index: Index,
    pub(crate) encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetUtxosReply {
    #[serde(default)]
    pub(crate) utxos: Vec<String>,
    #[serde(default)]
    pub(crate) end_index: Index,
}

// ==============================================================================
// Assets and Balances
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssetIdArgs<'a> {
    #[serde(rename = "assetID")]
    pub(crate) asset_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescription {
    #[serde(rename = "assetID")]
    pub asset_id: Id,
    pub name: String,
    pub symbol: String,
    pub denomination: JsonU8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GetBalanceArgs<'a> {
    pub(crate) address: &'a str,
    #[serde(rename = "assetID")]
    pub(crate) asset_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReply {
    pub balance: JsonU64,
    #[serde(rename = "utxoIDs", default)]
    pub utxo_ids: Vec<UtxoId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub balance: JsonU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GetAllBalancesReply {
    #[serde(default)]
    pub(crate) balances: Vec<Balance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AssetIdReply {
    #[serde(rename = "assetID")]
    pub(crate) asset_id: Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAssetArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    pub(crate) name: String,
    pub(crate) symbol: String,
    pub(crate) denomination: u8,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) initial_holders: Vec<Holder>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub(crate) minter_sets: Vec<Owners>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateNftAssetArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    pub(crate) name: String,
    pub(crate) symbol: String,
    pub(crate) minter_sets: Vec<Owners>,
}

// ==============================================================================
// Keystore
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExportKeyArgs {
    #[serde(flatten)]
    pub(crate) user: UserPass,
    pub(crate) address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportKeyReply {
    pub(crate) private_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportKeyArgs {
    #[serde(flatten)]
    pub(crate) user: UserPass,
    pub(crate) private_key: String,
}

// ==============================================================================
// Spending
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SendArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    #[serde(flatten)]
    pub(crate) output: SendOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SendMultipleArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    pub(crate) outputs: Vec<SendOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MintArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    pub(crate) amount: JsonU64,
    #[serde(rename = "assetID")]
    pub(crate) asset_id: String,
    pub(crate) to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SendNftArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    #[serde(rename = "assetID")]
    pub(crate) asset_id: String,
    #[serde(rename = "groupID")]
    pub(crate) group_id: JsonU32,
    pub(crate) to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MintNftArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    #[serde(rename = "assetID")]
    pub(crate) asset_id: String,
    pub(crate) payload: String,
    pub(crate) encoding: Encoding,
    pub(crate) to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportArgs {
    #[serde(flatten)]
    pub(crate) user: UserPass,
    pub(crate) to: String,
    pub(crate) source_chain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExportAvaxArgs {
    #[serde(flatten)]
    pub(crate) header: SpendHeader,
    pub(crate) amount: JsonU64,
    pub(crate) to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExportArgs {
    #[serde(flatten)]
    pub(crate) base: ExportAvaxArgs,
    #[serde(rename = "assetID")]
    pub(crate) asset_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::assert_round_trip;

    fn header() -> SpendHeader {
        SpendHeader::new(
            UserPass::new("alice", "pw"),
            vec!["X-local1from".to_owned()],
            "X-local1change",
        )
    }

    #[test]
    fn send_args_flatten_header_and_output() {
        let args = SendArgs {
            header: header(),
            output: SendOutput {
                amount: JsonU64(1_000),
                asset_id: "AVAX".to_owned(),
                to: "X-local1to".to_owned(),
            },
        };
        assert_eq!(
            serde_json::to_value(&args).expect("must encode"),
            serde_json::json!({
                "username": "alice",
                "password": "pw",
                "from": ["X-local1from"],
                "changeAddr": "X-local1change",
                "amount": "1000",
                "assetID": "AVAX",
                "to": "X-local1to"
            })
        );
    }

    #[test]
    fn export_args_nest_two_levels_of_flattening() {
        let args = ExportArgs {
            base: ExportAvaxArgs {
                header: header(),
                amount: JsonU64(5),
                to: "P-local1dest".to_owned(),
            },
            asset_id: "AVAX".to_owned(),
        };
        let value = serde_json::to_value(&args).expect("must encode");
        assert_eq!(value["amount"], serde_json::json!("5"));
        assert_eq!(value["assetID"], serde_json::json!("AVAX"));
        assert_eq!(value["username"], serde_json::json!("alice"));

        let decoded: ExportArgs = serde_json::from_value(value).expect("must decode");
        assert_eq!(decoded, args);
    }

    #[test]
    fn create_asset_args_omit_unused_holder_lists() {
        let args = CreateAssetArgs {
            header: header(),
            name: "Coin".to_owned(),
            symbol: "CN".to_owned(),
            denomination: 9,
            initial_holders: vec![Holder {
                amount: JsonU64(10),
                address: "X-local1h".to_owned(),
            }],
            minter_sets: Vec::new(),
        };
        let value = serde_json::to_value(&args).expect("must encode");
        assert_eq!(value["denomination"], serde_json::json!(9));
        assert_eq!(
            value["initialHolders"],
            serde_json::json!([{"amount": "10", "address": "X-local1h"}])
        );
        assert!(value.get("minterSets").is_none());
    }

    #[test]
    fn balance_reply_decodes_utxo_ids() {
        let reply: BalanceReply = serde_json::from_value(serde_json::json!({
            "balance": "299999999999900",
            "utxoIDs": [{
                "txID": "11111111111111111111111111111111LpoYY",
                "outputIndex": 1
            }]
        }))
        .expect("must decode");
        assert_eq!(reply.balance, JsonU64(299_999_999_999_900));
        assert_eq!(reply.utxo_ids[0].tx_id, Id::EMPTY);
        assert_eq!(reply.utxo_ids[0].output_index, 1);
    }

    #[test]
    fn argument_shapes_survive_encode_and_decode() {
        let owners = Owners {
            threshold: JsonU32(2),
            minters: vec!["X-local1m1".to_owned(), "X-local1m2".to_owned()],
        };
        let output = SendOutput {
            amount: JsonU64(u64::MAX),
            asset_id: "AVAX".to_owned(),
            to: "X-local1to".to_owned(),
        };

        assert_round_trip(&CreateAssetArgs {
            header: header(),
            name: "Coin".to_owned(),
            symbol: "CN".to_owned(),
            denomination: 9,
            initial_holders: vec![Holder {
                amount: JsonU64(10),
                address: "X-local1h".to_owned(),
            }],
            minter_sets: vec![owners.clone()],
        });
        assert_round_trip(&CreateNftAssetArgs {
            header: header(),
            name: "Art".to_owned(),
            symbol: "ART".to_owned(),
            minter_sets: vec![owners],
        });
        assert_round_trip(&SendArgs {
            header: header(),
            output: output.clone(),
        });
        assert_round_trip(&SendMultipleArgs {
            header: header(),
            outputs: vec![output.clone(), output],
        });
        assert_round_trip(&MintArgs {
            header: header(),
            amount: JsonU64(42),
            asset_id: "asset".to_owned(),
            to: "X-local1to".to_owned(),
        });
        assert_round_trip(&SendNftArgs {
            header: header(),
            asset_id: "nft".to_owned(),
            group_id: JsonU32(3),
            to: "X-local1to".to_owned(),
        });
        assert_round_trip(&MintNftArgs {
            header: header(),
            asset_id: "nft".to_owned(),
            payload: crate::formatting::encode_hex(b"hello"),
            encoding: Encoding::Hex,
            to: "X-local1to".to_owned(),
        });
        assert_round_trip(&ImportArgs {
            user: UserPass::new("alice", "pw"),
            to: "X-local1to".to_owned(),
            source_chain: "P".to_owned(),
        });
        assert_round_trip(&ExportKeyArgs {
            user: UserPass::new("alice", "pw"),
            address: "X-local1a".to_owned(),
        });
        assert_round_trip(&ImportKeyArgs {
            user: UserPass::new("alice", "pw"),
            private_key: "PrivateKey-x".to_owned(),
        });
        assert_round_trip(&GetUtxosArgs {
            addresses: vec!["X-local1a".to_owned()],
            limit: JsonU32(1024),
            start_index: Index {
                address: "X-local1a".to_owned(),
                utxo: "cursor".to_owned(),
            },
            encoding: Encoding::Cb58,
        });
    }

    #[test]
    fn reply_shapes_survive_encode_and_decode() {
        assert_round_trip(&GetUtxosReply {
            utxos: vec!["0xdeadbeef".to_owned()],
            end_index: Index {
                address: "X-local1a".to_owned(),
                utxo: "cursor".to_owned(),
            },
        });
        assert_round_trip(&AssetDescription {
            asset_id: Id::EMPTY,
            name: "Avalanche".to_owned(),
            symbol: "AVAX".to_owned(),
            denomination: JsonU8(9),
        });
        assert_round_trip(&BalanceReply {
            balance: JsonU64(7),
            utxo_ids: vec![UtxoId {
                tx_id: Id::EMPTY,
                output_index: 4,
            }],
        });
        assert_round_trip(&GetTxStatusReply {
            status: Status::Rejected,
        });
    }

    #[test]
    fn utxos_reply_ignores_fetch_count() {
        let reply: GetUtxosReply = serde_json::from_value(serde_json::json!({
            "numFetched": "1",
            "utxos": ["0xdeadbeef"],
            "endIndex": {"address": "X-local1a", "utxo": "cursor"}
        }))
        .expect("must decode");
        assert_eq!(reply.utxos, vec!["0xdeadbeef".to_owned()]);
        assert_eq!(reply.end_index.utxo, "cursor");
    }
}
