//! Client library for the Nimiq JSON-RPC API.
//!
//! [`NimiqClient`] exposes typed node operations on top of an
//! [`RpcTransport`](rpc::RpcTransport); [`StakingClient`] adds the staking
//! operations of Albatross nodes; [`BlockListener`] streams new blocks.

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod listener;
pub mod rpc;
pub mod staking;
pub mod types;
pub mod units;

#[cfg(test)]
mod test_util;

pub use client::NimiqClient;
pub use config::{ClientConfig, Credentials};
pub use error::{Error, RemoteError, RpcError, RpcErrorKind};
pub use listener::{block_listener, BlockListener};
pub use staking::StakingClient;
pub use units::{coin_to_subunits, normalize_amount, subunits_to_coin, Amount, SUBUNITS_PER_COIN};

pub use rust_decimal::Decimal;
