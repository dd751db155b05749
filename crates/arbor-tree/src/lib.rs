//! Lossless, immutable syntax trees shared between language front-ends.
//!
//! Nodes live behind reference-counted pointers, so two versions of a tree can
//! share every subtree that did not change between them.

mod builder;
mod edit;
mod id;
mod kind;
mod language;
mod marker;
/// Node payloads, grouped by the language that introduces them.
pub mod nodes;
mod padding;
mod role_set;
mod space;
mod tree;

/// Deterministic construction of trees with sequential ids.
pub use builder::TreeBuilder;
/// Stable node identities.
pub use id::NodeId;
/// Wire discriminants and field roles.
pub use kind::{NodeKind, Role};
/// Declared source language of a tree.
pub use language::Language;
/// Open, extensible node metadata.
pub use marker::{Marker, MarkerKind, Markers, SearchResult, Semicolon, TrailingComma};
/// Whitespace-and-punctuation wrappers.
pub use padding::{Container, LeftPadded, RightPadded};
/// Compact set for grouping `Role` values.
pub use role_set::RoleSet;
/// Leading whitespace and comments.
pub use space::{Comment, PyComment, Space, TextComment};
/// The tree sum types.
pub use tree::{J, Node, Py, Slot, Tree};
