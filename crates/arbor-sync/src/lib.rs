//! Differential synchronization of `arbor_tree` trees.
//!
//! A round encodes a tree against the baseline both endpoints last agreed on.
//! The first round of a session carries the whole tree; later rounds carry a
//! `NoChange` for every value that is still the baseline's, down to a single
//! item for an untouched tree.

mod binding;
mod list;
mod queue;
mod receiver;
mod registry;
mod sender;
mod session;
mod transmit;
pub mod transport;

pub use queue::{Item, ReceiveQueue, RoundStats, SendQueue, Value, debug_items};
pub use receiver::{Receiver, receive};
pub use registry::{
    CodecRegistry, DecodeMarker, DecodeSpace, EncodeMarker, EncodeSpace, MarkerCodec,
    RegistryBuilder, SpaceCodec,
};
pub use sender::{Sender, send};
pub use session::{ReceiveSession, SendSession};
pub use transmit::{Atom, Keyed, Transmit};

#[cfg(test)]
mod tests;
