//! Argument and reply shapes shared by more than one service.

use serde::{Deserialize, Serialize};

use crate::formatting::Encoding;
use crate::ids::Id;

/// Keystore credentials carried by calls that sign with a stored key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPass {
    pub username: String,
    pub password: String,
}

impl UserPass {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Credentials plus the funding and change addresses of a spending call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendHeader {
    #[serde(flatten)]
    pub user: UserPass,
    pub from: Vec<String>,
    #[serde(rename = "changeAddr")]
    pub change_addr: String,
}

impl SpendHeader {
    pub fn new(user: UserPass, from: Vec<String>, change_addr: impl Into<String>) -> Self {
        Self {
            user,
            from,
            change_addr: change_addr.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIdArgs {
    #[serde(rename = "txID")]
    pub tx_id: Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIdReply {
    #[serde(rename = "txID")]
    pub tx_id: Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTxArgs {
    #[serde(rename = "txID")]
    pub tx_id: Id,
    pub encoding: Encoding,
}

/// A transaction rendered as text in the given encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTx {
    pub tx: String,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressArgs {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReply {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressesReply {
    pub addresses: Vec<String>,
}
