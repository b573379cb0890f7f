use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::formatting::{strip_checksum, with_checksum};

pub const ID_LEN: usize = 32;

// ==============================================================================
// Id
// ==============================================================================

/// 32-byte identifier (transaction, asset, chain).
///
/// The text form is CB58: base58 over the bytes followed by a four byte
/// SHA-256 checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Id([u8; ID_LEN]);

impl Id {
    pub const EMPTY: Id = Id([0u8; ID_LEN]);

    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(with_checksum(&self.0)).into_string())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({self})")
    }
}

impl FromStr for Id {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let checked = bs58::decode(s)
            .into_vec()
            .map_err(|e| CoreError::InvalidData(format!("invalid cb58 id `{s}`: {e}")))?;
        let payload = strip_checksum(&checked)
            .map_err(|e| CoreError::InvalidData(format!("invalid cb58 id `{s}`: {e}")))?;
        let bytes: [u8; ID_LEN] = payload.try_into().map_err(|_| {
            CoreError::InvalidData(format!(
                "id `{s}` decodes to {} bytes, expected {ID_LEN}",
                payload.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ==============================================================================
// Decision Status
// ==============================================================================

/// Consensus status of a transaction as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Unknown,
    Processing,
    Rejected,
    Accepted,
}

impl Status {
    /// Whether consensus has reached a final decision.
    pub fn decided(self) -> bool {
        matches!(self, Status::Rejected | Status::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CB58 of the all-zero id, as printed by Avalanche nodes.
    const EMPTY_ID_CB58: &str = "11111111111111111111111111111111LpoYY";

    #[test]
    fn empty_id_text_form() {
        assert_eq!(Id::EMPTY.to_string(), EMPTY_ID_CB58);
        let parsed: Id = EMPTY_ID_CB58.parse().expect("should parse");
        assert!(parsed.is_empty());
    }

    #[test]
    fn id_parses_its_own_text_form() {
        let mut bytes = [0u8; ID_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let id = Id::from_bytes(bytes);
        let parsed: Id = id.to_string().parse().expect("should parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn id_rejects_corrupted_checksum() {
        let err = "11111111111111111111111111111111LpoYZ"
            .parse::<Id>()
            .expect_err("checksum must fail");
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn id_rejects_wrong_length() {
        let short = bs58::encode(crate::formatting::with_checksum(&[1, 2, 3])).into_string();
        let err = short.parse::<Id>().expect_err("length must fail");
        assert!(err.to_string().contains("expected 32"));
    }

    #[test]
    fn id_serializes_as_string() {
        let value = serde_json::to_value(Id::EMPTY).expect("must encode");
        assert_eq!(value, serde_json::json!(EMPTY_ID_CB58));
    }

    #[test]
    fn status_uses_variant_names() {
        let status: Status =
            serde_json::from_value(serde_json::json!("Accepted")).expect("must decode");
        assert_eq!(status, Status::Accepted);
        assert!(status.decided());
        assert!(!Status::Processing.decided());
    }
}
