//! Polling stream of new blocks.

use std::time::Duration;

use futures::stream::{self, Stream};
use tracing::{debug, trace};

use crate::client::NimiqClient;
use crate::error::Error;
use crate::rpc::RpcTransport;
use crate::types::Block;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Yields blocks in height order as the node produces them.
///
/// Each call to [`stream`](Self::stream) starts a fresh sequence. Without
/// [`starting_at`](Self::starting_at) the sequence begins at the chain
/// height read on its first poll. A height the node has no block for yet
/// is retried after the poll interval; any error ends the sequence.
/// Only one request is in flight at a time, and waiting suspends only
/// this stream. Drop the stream to cancel it.
pub struct BlockListener<'c, T> {
    client: &'c NimiqClient<T>,
    first_block: Option<u32>,
    poll_interval: Duration,
    include_txs: bool,
}

impl<'c, T: RpcTransport> BlockListener<'c, T> {
    pub fn new(client: &'c NimiqClient<T>) -> Self {
        Self {
            client,
            first_block: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            include_txs: false,
        }
    }

    pub fn starting_at(mut self, height: u32) -> Self {
        self.first_block = Some(height);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Request full transactions instead of hashes.
    pub fn include_transactions(mut self, include_txs: bool) -> Self {
        self.include_txs = include_txs;
        self
    }

    pub fn stream(&self) -> impl Stream<Item = Result<Block, Error>> + 'c {
        let client = self.client;
        let poll_interval = self.poll_interval;
        let include_txs = self.include_txs;

        stream::try_unfold(self.first_block, move |next| async move {
            let height = match next {
                Some(height) => height,
                None => client.block_number().await?,
            };
            let block = wait_for_block(client, height, include_txs, poll_interval).await?;
            Ok::<_, Error>(Some((block, Some(height + 1))))
        })
    }
}

async fn wait_for_block<T: RpcTransport>(
    client: &NimiqClient<T>,
    height: u32,
    include_txs: bool,
    poll_interval: Duration,
) -> Result<Block, Error> {
    loop {
        if let Some(block) = client.get_block_by_number(height, include_txs).await? {
            debug!(height, hash = %block.hash, "new block");
            return Ok(block);
        }
        trace!(height, ?poll_interval, "block not yet available");
        tokio::time::sleep(poll_interval).await;
    }
}

/// Blocks from `first_block` (or the current height) onwards, polled once
/// per [`DEFAULT_POLL_INTERVAL`].
pub fn block_listener<T: RpcTransport>(
    client: &NimiqClient<T>,
    first_block: Option<u32>,
) -> impl Stream<Item = Result<Block, Error>> + '_ {
    let listener = BlockListener::new(client);
    match first_block {
        Some(height) => listener.starting_at(height).stream(),
        None => listener.stream(),
    }
}
