//! Typed client for the Nimiq JSON-RPC API.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::encoding::encode_hex;
use crate::error::Error;
use crate::rpc::{HttpTransport, RpcTransport};
use crate::types::{
    Account, Block, OutgoingTransaction, OutgoingTransactionParams, Transaction, Wallet,
};
use crate::units::{normalize_amount, subunits_to_coin};

/// API client for a Nimiq node.
///
/// Each operation maps onto one RPC method. Amounts are normalized to luna
/// on the way out and balances converted to NIM on the way back; binary
/// arguments are hex-encoded and binary transaction members hex-decoded.
///
/// ```no_run
/// # async fn demo() -> Result<(), nimiq_rpc::Error> {
/// let nimiq = nimiq_rpc::NimiqClient::new("http://localhost:8648")?;
/// for account in nimiq.accounts().await? {
///     let balance = nimiq.get_balance(&account.address).await?;
///     println!("{}: {balance} NIM", account.address);
/// }
/// # Ok(())
/// # }
/// ```
pub struct NimiqClient<T = HttpTransport> {
    rpc: T,
}

impl NimiqClient<HttpTransport> {
    pub fn new(url: &str) -> Result<Self, Error> {
        Self::with_config(&ClientConfig::new(url))
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, Error> {
        HttpTransport::with_config(config).map(Self::with_transport)
    }

    /// Configure from `NIMIQ_RPC_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::with_config(&ClientConfig::from_env()?)
    }
}

impl<T: RpcTransport> NimiqClient<T> {
    pub fn with_transport(rpc: T) -> Self {
        Self { rpc }
    }

    pub fn transport(&self) -> &T {
        &self.rpc
    }

    /// Issue a raw call. The result is returned without any reshaping.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, Error> {
        self.rpc.call(method, params).await
    }

    async fn call_as<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, Error> {
        let raw = self.rpc.call(method, params).await?;
        serde_json::from_value(raw)
            .map_err(|e| Error::InvalidData(format!("invalid {method} result: {e}")))
    }

    // --------------------------------------------------------------------------
    // Transactions
    // --------------------------------------------------------------------------

    /// Submit a serialized transaction. Returns the transaction hash.
    pub async fn send_raw_transaction(&self, tx: &[u8]) -> Result<String, Error> {
        self.call_as("sendRawTransaction", vec![json!(encode_hex(tx))])
            .await
    }

    /// Create, sign and submit a transaction from an unlocked account.
    /// Returns the transaction hash.
    pub async fn send_transaction(&self, tx: &OutgoingTransaction) -> Result<String, Error> {
        let params = OutgoingTransactionParams {
            from: &tx.from,
            to: &tx.to,
            value: normalize_amount(tx.value)?,
            fee: normalize_amount(tx.fee)?,
            flags: tx.flags,
            data: tx.data.as_ref().map(encode_hex),
            to_type: tx.to_type,
        };
        debug!(
            from = %tx.from,
            to = %tx.to,
            value = params.value,
            fee = params.fee,
            "sending transaction"
        );
        let params = serde_json::to_value(&params)
            .map_err(|e| Error::InvalidData(format!("encode sendTransaction params: {e}")))?;
        self.call_as("sendTransaction", vec![params]).await
    }

    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<Option<Transaction>, Error> {
        self.call_as("getTransactionByHash", vec![json!(hash)])
            .await
    }

    pub async fn get_transaction_by_block_hash_and_index(
        &self,
        block_hash: &str,
        index: u32,
    ) -> Result<Option<Transaction>, Error> {
        self.call_as(
            "getTransactionByBlockHashAndIndex",
            vec![json!(block_hash), json!(index)],
        )
        .await
    }

    pub async fn get_transaction_by_block_number_and_index(
        &self,
        number: u32,
        index: u32,
    ) -> Result<Option<Transaction>, Error> {
        self.call_as(
            "getTransactionByBlockNumberAndIndex",
            vec![json!(number), json!(index)],
        )
        .await
    }

    pub async fn get_transaction_receipt(&self, hash: &str) -> Result<Value, Error> {
        self.call("getTransactionReceipt", vec![json!(hash)]).await
    }

    /// Transactions sent from or to `address`, newest first. `limit` is
    /// left to the node's default when `None`.
    pub async fn get_transactions_by_address(
        &self,
        address: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>, Error> {
        self.call_as("getTransactionsByAddress", vec![json!(address), json!(limit)])
            .await
    }

    // --------------------------------------------------------------------------
    // Mempool and mining
    // --------------------------------------------------------------------------

    pub async fn mempool(&self) -> Result<Value, Error> {
        self.call("mempool", Vec::new()).await
    }

    pub async fn mempool_content(&self, include_txs: bool) -> Result<Value, Error> {
        self.call("mempoolContent", vec![json!(include_txs)]).await
    }

    pub async fn mining(&self) -> Result<bool, Error> {
        self.call_as("mining", Vec::new()).await
    }

    /// Current hashrate in H/s.
    pub async fn hashrate(&self) -> Result<f64, Error> {
        self.call_as("hashrate", Vec::new()).await
    }

    // --------------------------------------------------------------------------
    // Accounts
    // --------------------------------------------------------------------------

    pub async fn accounts(&self) -> Result<Vec<Account>, Error> {
        self.call_as("accounts", Vec::new()).await
    }

    pub async fn create_account(&self) -> Result<Wallet, Error> {
        self.call_as("createAccount", Vec::new()).await
    }

    /// Balance of `address` in NIM.
    pub async fn get_balance(&self, address: &str) -> Result<Decimal, Error> {
        let luna: u64 = self.call_as("getBalance", vec![json!(address)]).await?;
        Ok(subunits_to_coin(luna))
    }

    pub async fn import_raw_key(&self, key: &[u8], password: &str) -> Result<Value, Error> {
        self.call("importRawKey", vec![json!(encode_hex(key)), json!(password)])
            .await
    }

    pub async fn lock_account(&self, address: &str) -> Result<Value, Error> {
        self.call("lockAccount", vec![json!(address)]).await
    }

    pub async fn unlock_account(&self, address: &str, password: &str) -> Result<Value, Error> {
        self.call("unlockAccount", vec![json!(address), json!(password)])
            .await
    }

    // --------------------------------------------------------------------------
    // Blocks
    // --------------------------------------------------------------------------

    /// Current chain height.
    pub async fn block_number(&self) -> Result<u32, Error> {
        self.call_as("blockNumber", Vec::new()).await
    }

    /// `None` when the node does not know the block.
    pub async fn get_block_by_hash(
        &self,
        hash: &str,
        include_txs: bool,
    ) -> Result<Option<Block>, Error> {
        self.call_as("getBlockByHash", vec![json!(hash), json!(include_txs)])
            .await
    }

    /// `None` when no block exists at `number` yet.
    pub async fn get_block_by_number(
        &self,
        number: u32,
        include_txs: bool,
    ) -> Result<Option<Block>, Error> {
        self.call_as("getBlockByNumber", vec![json!(number), json!(include_txs)])
            .await
    }

    pub async fn get_block_transaction_count_by_hash(&self, hash: &str) -> Result<u32, Error> {
        self.call_as("getBlockTransactionCountByHash", vec![json!(hash)])
            .await
    }

    pub async fn get_block_transaction_count_by_number(&self, number: u32) -> Result<u32, Error> {
        self.call_as("getBlockTransactionCountByNumber", vec![json!(number)])
            .await
    }

    // --------------------------------------------------------------------------
    // Network
    // --------------------------------------------------------------------------

    pub async fn peer_count(&self) -> Result<u32, Error> {
        self.call_as("peerCount", Vec::new()).await
    }

    pub async fn peer_list(&self) -> Result<Value, Error> {
        self.call("peerList", Vec::new()).await
    }

    /// Query a peer, or change its state when `state` is given
    /// (e.g. `"disconnect"`, `"ban"`).
    pub async fn peer_state(&self, peer: &str, state: Option<&str>) -> Result<Value, Error> {
        self.call("peerState", vec![json!(peer), json!(state)]).await
    }

    /// Consensus state, e.g. `"established"` or `"syncing"`.
    pub async fn consensus(&self) -> Result<String, Error> {
        self.call_as("consensus", Vec::new()).await
    }
}
