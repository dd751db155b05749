//! In-process transport: one JSON frame per round over a channel.

use crossbeam_channel as channel;
use thiserror::Error;

use crate::Item;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("the other end of the pipe is gone")]
    Disconnected,
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn encode_round(items: &[Item]) -> Result<String, TransportError> {
    Ok(serde_json::to_string(items)?)
}

pub fn decode_round(frame: &str) -> Result<Vec<Item>, TransportError> {
    Ok(serde_json::from_str(frame)?)
}

/// A unidirectional, unbounded pipe of rounds.
pub fn pipe() -> (Outbox, Inbox) {
    let (sender, receiver) = channel::unbounded();
    (Outbox { sender }, Inbox { receiver })
}

#[derive(Debug, Clone)]
pub struct Outbox {
    sender: channel::Sender<String>,
}

impl Outbox {
    pub fn send_round(&self, items: &[Item]) -> Result<(), TransportError> {
        let frame = encode_round(items)?;
        if self.sender.send(frame).is_err() {
            return Err(TransportError::Disconnected);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Inbox {
    receiver: channel::Receiver<String>,
}

impl Inbox {
    /// Blocks until the next round arrives.
    pub fn recv_round(&self) -> Result<Vec<Item>, TransportError> {
        let frame =
            self.receiver.recv().map_err(|channel::RecvError| TransportError::Disconnected)?;
        decode_round(&frame)
    }

    /// Every round that is already waiting, in order.
    pub fn drain(&self) -> Result<Vec<Vec<Item>>, TransportError> {
        self.receiver.try_iter().map(|frame| decode_round(&frame)).collect()
    }
}
