use core::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use log::debug;

const ORDERING: Ordering = Ordering::SeqCst;

#[derive(Default)]
pub struct SyncedStatus(AtomicBool);

impl SyncedStatus {
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(AtomicBool::new(value))
    }

    pub fn get(&self) -> bool {
        self.0.load(ORDERING)
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, ORDERING);
    }
}

/// Messages sent to the HTTP API by the component that tracks chain sync.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncToApi {
    SyncStatus(bool),
    Stop,
}

impl SyncToApi {
    pub fn send(self, tx: &UnboundedSender<Self>) {
        if let Err(message) = tx.unbounded_send(self) {
            debug!("send to HTTP API failed because the receiver was dropped: {message:?}");
        }
    }
}

/// Reports whether the head of the chain has been verified by an execution engine.
#[async_trait]
pub trait OptimisticModeFetcher: Send + Sync {
    async fn is_optimistic(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use futures::channel::mpsc;

    use super::*;

    #[test]
    fn synced_status_can_be_updated() {
        let status = SyncedStatus::new(false);

        assert!(!status.get());

        status.set(true);

        assert!(status.get());
    }

    #[test]
    fn sending_to_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded();

        drop(rx);

        SyncToApi::Stop.send(&tx);
    }
}
