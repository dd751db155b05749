use std::sync::Arc;

use arbor_errors::Result;
use arbor_tree::Tree;
use tracing::{debug, warn};

use crate::{CodecRegistry, Item, RoundStats, receiver, sender};

/// The sending endpoint of one tree's synchronization.
///
/// Remembers the last tree it sent so the next round can be differential.
#[derive(Debug)]
pub struct SendSession {
    registry: Arc<CodecRegistry>,
    baseline: Option<Tree>,
    rounds: u64,
}

impl SendSession {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry, baseline: None, rounds: 0 }
    }

    pub fn send(&mut self, tree: &Tree) -> Result<Vec<Item>> {
        match sender::send(tree, self.baseline.as_ref(), &self.registry) {
            Ok(items) => {
                self.rounds += 1;
                let stats = RoundStats::of(&items);
                debug!(round = self.rounds, full = self.baseline.is_none(), %stats, "sent round");
                self.baseline = Some(tree.clone());
                Ok(items)
            }
            Err(error) => {
                warn!(round = self.rounds + 1, %error, "send failed, next round is full");
                self.baseline = None;
                Err(error)
            }
        }
    }

    /// Forgets the baseline, e.g. because the peer lost its own.
    pub fn reset(&mut self) {
        if self.baseline.take().is_some() {
            debug!(round = self.rounds, "send baseline reset");
        }
    }

    pub fn baseline(&self) -> Option<&Tree> {
        self.baseline.as_ref()
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}

/// The receiving endpoint of one tree's synchronization.
#[derive(Debug)]
pub struct ReceiveSession {
    registry: Arc<CodecRegistry>,
    baseline: Option<Tree>,
    rounds: u64,
}

impl ReceiveSession {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry, baseline: None, rounds: 0 }
    }

    /// Decodes one round. On failure the baseline is dropped, so only a full
    /// round can succeed next.
    pub fn receive(&mut self, items: Vec<Item>) -> Result<Tree> {
        let stats = RoundStats::of(&items);
        match receiver::receive(self.baseline.as_ref(), items, &self.registry) {
            Ok(tree) => {
                self.rounds += 1;
                debug!(round = self.rounds, %stats, "received round");
                self.baseline = Some(tree.clone());
                Ok(tree)
            }
            Err(error) => {
                let round = self.rounds + 1;
                warn!(round, kind = ?error.kind(), %error, "receive failed, baseline dropped");
                self.baseline = None;
                Err(error)
            }
        }
    }

    pub fn reset(&mut self) {
        if self.baseline.take().is_some() {
            debug!(round = self.rounds, "receive baseline reset");
        }
    }

    pub fn baseline(&self) -> Option<&Tree> {
        self.baseline.as_ref()
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}
