//! # WorkQueue: shared multi-producer/multi-consumer parcel queue.
//!
//! Thin wrapper over an unbounded [`async_channel`]. Its `Receiver` is `Clone`,
//! so every worker holds its own handle and no worker blocks the others while
//! waiting for an item.
//!
//! ## Rules
//! - `put` never blocks (unbounded).
//! - `get` waits at most `timeout` and reports [`QueueError::Empty`] otherwise.
//! - Delivery is FIFO per channel, but which consumer receives which item is unspecified.
//! - An item handed out by `get` is never returned to the queue.

use std::time::Duration;

use tokio::time;

use crate::{error::QueueError, parcel::Item};

/// Shared work queue; clones refer to the same underlying channel.
#[derive(Clone, Debug)]
pub struct WorkQueue {
    tx: async_channel::Sender<Item>,
    rx: async_channel::Receiver<Item>,
}

impl WorkQueue {
    pub fn new() -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self { tx, rx }
    }

    /// Enqueues an item without waiting.
    pub fn put(&self, item: Item) -> Result<(), QueueError> {
        self.tx.try_send(item).map_err(|_| QueueError::Closed)
    }

    /// Waits up to `timeout` for the next item.
    pub async fn get(&self, timeout: Duration) -> Result<Item, QueueError> {
        match time::timeout(timeout, self.rx.recv()).await {
            Ok(Ok(item)) => Ok(item),
            Ok(Err(_closed)) => Err(QueueError::Closed),
            Err(_elapsed) => Err(QueueError::Empty { timeout }),
        }
    }

    /// Closes the queue; remaining items can still be drained.
    pub fn close(&self) -> bool {
        self.tx.close()
    }

    /// Number of items currently waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}
