//! JSON-RPC client for Nimiq nodes over HTTP.
//!
//! Implements [`RpcTransport`](super::RpcTransport) using `reqwest`, with
//! optional basic auth and per-instance tracing context.

mod client;
mod connection;
mod protocol;

pub use client::HttpTransport;
