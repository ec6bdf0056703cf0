//! Staking on Albatross nodes.
//!
//! [`StakingClient`] wraps a [`NimiqClient`] and adds the operations that
//! only a validator-enabled node supports. The base operations stay
//! available through [`StakingClient::base`].

use serde_json::{json, Value};
use tracing::debug;

use crate::client::NimiqClient;
use crate::encoding::{decode_hex_member, encode_hex};
use crate::error::Error;
use crate::rpc::{HttpTransport, RpcTransport};
use crate::types::ValidatorKey;
use crate::units::{normalize_amount, Amount};

/// Address of the staking contract on the Albatross devnet.
pub const STAKING_CONTRACT_ADDRESS: &str = "NQ60 GA6V BV8S YVX1 XGCY 88LR D2K6 G2P4 U9MH";

pub struct StakingClient<T = HttpTransport> {
    base: NimiqClient<T>,
}

impl<T: RpcTransport> StakingClient<T> {
    pub fn new(base: NimiqClient<T>) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &NimiqClient<T> {
        &self.base
    }

    pub fn into_base(self) -> NimiqClient<T> {
        self.base
    }

    /// The node's validator key and proof of knowledge, decoded from hex.
    pub async fn validator_key(&self) -> Result<ValidatorKey, Error> {
        let raw = self.base.call("validatorKey", Vec::new()).await?;
        Ok(ValidatorKey {
            validator_key: decode_hex_member(&raw, "validatorKey")?,
            proof_of_knowledge: decode_hex_member(&raw, "proofOfKnowledge")?,
        })
    }

    /// Stake `amount` from `staker_address` for this node's validator.
    ///
    /// Fetches the validator key first and then issues `stake` with params
    /// `[validator key, proof of knowledge, staker, luna, reward address]`.
    /// A failure of either call is returned as-is.
    pub async fn stake(
        &self,
        reward_address: &str,
        staker_address: &str,
        amount: impl Into<Amount>,
    ) -> Result<Value, Error> {
        let value = normalize_amount(amount.into())?;
        let validator = self.validator_key().await?;
        debug!(staker = staker_address, reward = reward_address, value, "staking");
        self.base
            .call(
                "stake",
                vec![
                    json!(encode_hex(&validator.validator_key)),
                    json!(encode_hex(&validator.proof_of_knowledge)),
                    json!(staker_address),
                    json!(value),
                    json!(reward_address),
                ],
            )
            .await
    }
}

impl<T: RpcTransport> From<NimiqClient<T>> for StakingClient<T> {
    fn from(base: NimiqClient<T>) -> Self {
        Self::new(base)
    }
}
