//! Typed results of the Nimiq JSON-RPC API.
//!
//! Members this crate does not model are kept in `extra` so nothing the
//! node sends is lost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::encoding::hex_opt;
use crate::units::{subunits_to_coin, Amount};

// ==============================================================================
// Account and transaction type constants
// ==============================================================================

pub const ACCOUNT_BASIC: u8 = 0;
pub const ACCOUNT_VESTING: u8 = 1;
pub const ACCOUNT_HTLC: u8 = 2;
pub const ACCOUNT_STAKING: u8 = 3;

pub const TX_NONE: u8 = 0;
pub const TX_CONTRACT_CREATION: u8 = 1;

// ==============================================================================
// Transactions
// ==============================================================================

/// A transaction as returned by `getTransactionBy*` and embedded in blocks.
///
/// `data` and `raw` arrive hex-encoded and are decoded; a `null` or absent
/// member stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub block_hash: Option<String>,
    pub block_number: Option<u32>,
    pub timestamp: Option<u64>,
    pub confirmations: Option<u32>,
    pub transaction_index: Option<u32>,
    pub from: String,
    pub from_address: Option<String>,
    pub to: String,
    pub to_address: Option<String>,
    /// Value in luna.
    pub value: u64,
    /// Fee in luna.
    pub fee: u64,
    #[serde(default, with = "hex_opt")]
    pub data: Option<Vec<u8>>,
    #[serde(default, with = "hex_opt", skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<u8>>,
    #[serde(default)]
    pub flags: u8,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
    pub fn value_coins(&self) -> Decimal {
        subunits_to_coin(self.value)
    }

    pub fn fee_coins(&self) -> Decimal {
        subunits_to_coin(self.fee)
    }
}

/// Arguments of `sendTransaction`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingTransaction {
    pub from: String,
    pub to: String,
    pub value: Amount,
    pub fee: Amount,
    pub to_type: u8,
    pub flags: u8,
    pub data: Option<Vec<u8>>,
}

impl OutgoingTransaction {
    /// A basic transfer: recipient type [`ACCOUNT_BASIC`], no flags, no data.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        value: impl Into<Amount>,
        fee: impl Into<Amount>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value: value.into(),
            fee: fee.into(),
            to_type: ACCOUNT_BASIC,
            flags: TX_NONE,
            data: None,
        }
    }

    pub fn with_to_type(mut self, to_type: u8) -> Self {
        self.to_type = to_type;
        self
    }

    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Wire form of [`OutgoingTransaction`] after amount normalization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OutgoingTransactionParams<'a> {
    pub(crate) from: &'a str,
    pub(crate) to: &'a str,
    pub(crate) value: u64,
    pub(crate) fee: u64,
    pub(crate) flags: u8,
    /// Hex-encoded payload, `null` when absent.
    pub(crate) data: Option<String>,
    pub(crate) to_type: u8,
}

// ==============================================================================
// Blocks
// ==============================================================================

/// A block from `getBlockByHash` / `getBlockByNumber`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub number: u32,
    pub hash: String,
    #[serde(default)]
    pub timestamp: Option<u64>,
    /// `micro` or `macro` on Albatross nodes; absent elsewhere.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Blocks list transaction hashes unless full transactions were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransaction {
    Hash(String),
    Full(Box<Transaction>),
}

impl BlockTransaction {
    pub fn hash(&self) -> &str {
        match self {
            BlockTransaction::Hash(hash) => hash,
            BlockTransaction::Full(tx) => &tx.hash,
        }
    }
}

// ==============================================================================
// Accounts and validators
// ==============================================================================

/// An entry of `accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub address: String,
    /// Balance in luna, when the node reports it.
    #[serde(default)]
    pub balance: Option<u64>,
    #[serde(rename = "type", default)]
    pub account_type: Option<u8>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A freshly created account from `createAccount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub address: String,
    pub public_key: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The active validator's BLS public key and its proof of knowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorKey {
    pub validator_key: Vec<u8>,
    pub proof_of_knowledge: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_util::*;

    #[test]
    fn transaction_decodes_hex_data_and_keeps_extra_members() {
        let tx: Transaction =
            serde_json::from_value(transaction_json("aa01", Some("deadbeef"))).expect("parse");
        assert_eq!(tx.hash, "aa01");
        assert_eq!(tx.data, Some(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(tx.raw, None);
        assert_eq!(tx.value, 150_000);
        assert_eq!(tx.value_coins(), Decimal::new(15, 1));
        assert_eq!(tx.fee_coins(), Decimal::new(138, 5));
        assert_eq!(tx.extra.get("proof"), Some(&json!("ff")));
    }

    #[test]
    fn transaction_null_data_stays_none() {
        let tx: Transaction =
            serde_json::from_value(transaction_json("aa02", None)).expect("parse");
        assert_eq!(tx.data, None);
    }

    #[test]
    fn transaction_rejects_bad_hex() {
        let err = serde_json::from_value::<Transaction>(transaction_json("aa03", Some("zz")))
            .expect_err("bad hex must fail");
        assert!(err.to_string().contains("Invalid character"));
    }

    #[test]
    fn block_accepts_hashes_or_full_transactions() {
        let hashes: Block = serde_json::from_value(block_json(7, json!(["aa01", "aa02"])))
            .expect("parse hashes");
        assert_eq!(hashes.number, 7);
        assert_eq!(hashes.transactions.len(), 2);
        assert!(matches!(hashes.transactions[0], BlockTransaction::Hash(ref h) if h == "aa01"));

        let full: Block = serde_json::from_value(block_json(
            8,
            json!([transaction_json("bb01", Some("0102"))]),
        ))
        .expect("parse full");
        match &full.transactions[0] {
            BlockTransaction::Full(tx) => assert_eq!(tx.data, Some(vec![1, 2])),
            other => panic!("expected full transaction, got {other:?}"),
        }
        assert_eq!(full.transactions[0].hash(), "bb01");
    }

    #[test]
    fn block_keeps_type_and_unknown_members() {
        let mut raw = block_json(9, json!([]));
        raw["type"] = json!("macro");
        let block: Block = serde_json::from_value(raw).expect("parse");
        assert_eq!(block.kind.as_deref(), Some("macro"));
        assert!(block.extra.contains_key("parentHash"));
    }

    #[test]
    fn outgoing_params_use_wire_member_names() {
        let params = OutgoingTransactionParams {
            from: "NQ01",
            to: "NQ02",
            value: 100_000,
            fee: 10,
            flags: TX_NONE,
            data: Some("deadbeef".to_owned()),
            to_type: ACCOUNT_HTLC,
        };
        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({
                "from": "NQ01",
                "to": "NQ02",
                "value": 100_000,
                "fee": 10,
                "flags": 0,
                "data": "deadbeef",
                "toType": 2
            })
        );
    }
}
