//! Text encodings used for byte payloads on the wire.
//!
//! Transactions, UTXOs and NFT payloads travel as `0x`-prefixed hex with a
//! four byte checksum appended (the last four bytes of the payload's
//! SHA-256). Identifiers use the same checksum under base58 (see
//! [`crate::ids`]).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

pub const CHECKSUM_LEN: usize = 4;

const HEX_PREFIX: &str = "0x";

/// Encoding selector sent alongside byte payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Hex,
    Cb58,
}

/// Last [`CHECKSUM_LEN`] bytes of the SHA-256 digest of `bytes`.
pub fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

/// Append the checksum to `bytes`.
pub(crate) fn with_checksum(bytes: &[u8]) -> Vec<u8> {
    let mut checked = Vec::with_capacity(bytes.len() + CHECKSUM_LEN);
    checked.extend_from_slice(bytes);
    checked.extend_from_slice(&checksum(bytes));
    checked
}

/// Split a checksummed buffer and verify its trailing checksum.
pub(crate) fn strip_checksum(checked: &[u8]) -> Result<&[u8], CoreError> {
    if checked.len() < CHECKSUM_LEN {
        return Err(CoreError::InvalidData(format!(
            "encoded payload is {} bytes, shorter than its {CHECKSUM_LEN} byte checksum",
            checked.len()
        )));
    }
    let (payload, sum) = checked.split_at(checked.len() - CHECKSUM_LEN);
    if checksum(payload) != sum {
        return Err(CoreError::InvalidData("checksum mismatch".to_owned()));
    }
    Ok(payload)
}

/// Encode bytes as `0x`-prefixed checksummed hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("{HEX_PREFIX}{}", hex::encode(with_checksum(bytes)))
}

/// Decode `0x`-prefixed checksummed hex back into the raw payload.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, CoreError> {
    let digits = s.strip_prefix(HEX_PREFIX).ok_or_else(|| {
        CoreError::InvalidData(format!("hex payload must start with `{HEX_PREFIX}`"))
    })?;
    let checked =
        hex::decode(digits).map_err(|e| CoreError::InvalidData(format!("invalid hex: {e}")))?;
    Ok(strip_checksum(&checked)?.to_vec())
}
