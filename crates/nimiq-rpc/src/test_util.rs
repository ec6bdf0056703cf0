//! Shared JSON fixtures for unit tests.
//!
//! Shapes follow what a Nimiq node returns so parsing tests and client
//! tests agree on a single source of dummy data.

use serde_json::{json, Value};

pub const ADDRESS_A: &str = "NQ53 GQLU D6L5 FVQM MYUS DRDG GKMA 2NPP EC5J";
pub const ADDRESS_B: &str = "NQ76 X6N0 6AYX 10A3 679A AY77 9US6 QT3M NKMN";

/// A mined transaction worth 1.5 NIM with a 138 luna fee.
/// `data` is the hex payload, or `null` when `None`.
pub fn transaction_json(hash: &str, data: Option<&str>) -> Value {
    json!({
        "hash": hash,
        "blockHash": "bc01",
        "blockNumber": 42,
        "timestamp": 1_523_412_456,
        "confirmations": 3,
        "transactionIndex": 0,
        "from": "f1ac032bfe0814331d2a57ce74f346c6c75b4eb6",
        "fromAddress": ADDRESS_A,
        "to": "8629c69a857f715aff9a6e5b084eaa15af7730b2",
        "toAddress": ADDRESS_B,
        "value": 150_000,
        "fee": 138,
        "data": data,
        "flags": 0,
        "proof": "ff"
    })
}

/// A block at `number` carrying `transactions` (hashes or objects).
pub fn block_json(number: u32, transactions: Value) -> Value {
    json!({
        "number": number,
        "hash": format!("{number:064x}"),
        "parentHash": format!("{:064x}", number.saturating_sub(1)),
        "timestamp": 1_523_412_000 + u64::from(number),
        "size": 173,
        "transactions": transactions
    })
}
