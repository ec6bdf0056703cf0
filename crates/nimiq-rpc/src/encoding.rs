//! Hex encoding of binary payload fields.
//!
//! Raw transactions, keys and proofs travel as lowercase hex strings and
//! are exposed to callers as bytes.

use crate::error::Error;

/// Lowercase hex, as expected by the node.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

pub fn decode_hex(value: &str, field: &str) -> Result<Vec<u8>, Error> {
    hex::decode(value).map_err(|e| Error::InvalidData(format!("invalid hex in {field}: {e}")))
}

/// Read a required hex string member of a JSON object.
pub(crate) fn decode_hex_member(
    object: &serde_json::Value,
    member: &str,
) -> Result<Vec<u8>, Error> {
    let value = object
        .get(member)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| Error::InvalidData(format!("missing {member}")))?;
    decode_hex(value, member)
}

/// Serde adapter for optional hex fields: `null` or absent stays `None`,
/// a string is decoded, and `None` serializes as `null`.
pub mod hex_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| hex::decode(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
