//! The ordered item stream between a sender and a receiver.

use std::fmt;
use std::iter::Peekable;

use arbor_errors::{Desync, Result, SyncError};
use arbor_tree::{Language, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// One unit of the wire stream.
///
/// Items carry no field names: their meaning comes from the position at which
/// the receiver reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Item {
    Begin(Language),
    NoChange,
    Add,
    Change,
    Null,
    Node(NodeKind),
    Id(NodeId),
    Value(Value),
    Marker(String),
    ListHeader { len: u32 },
    ListRemove(NodeId),
    ListInsert { position: u32 },
    ListMove { id: NodeId, position: u32 },
    ListUpdate(NodeId),
    ListEnd,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "float")] f64),
    Str(String),
}

/// JSON has no infinities or NaN, so those travel as `{"float": "inf"}` and
/// friends. Finite floats stay plain numbers.
mod float {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Special { float: Special },
    }

    #[derive(Serialize, Deserialize)]
    enum Special {
        #[serde(rename = "inf")]
        Infinity,
        #[serde(rename = "-inf")]
        NegInfinity,
        #[serde(rename = "nan")]
        NaN,
    }

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = if value.is_finite() {
            Repr::Finite(*value)
        } else if value.is_nan() {
            Repr::Special { float: Special::NaN }
        } else if value.is_sign_positive() {
            Repr::Special { float: Special::Infinity }
        } else {
            Repr::Special { float: Special::NegInfinity }
        };
        repr.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Finite(value) => value,
            Repr::Special { float: Special::Infinity } => f64::INFINITY,
            Repr::Special { float: Special::NegInfinity } => f64::NEG_INFINITY,
            Repr::Special { float: Special::NaN } => f64::NAN,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(language) => write!(f, "begin {language}"),
            Self::NoChange => f.write_str("no-change"),
            Self::Add => f.write_str("add"),
            Self::Change => f.write_str("change"),
            Self::Null => f.write_str("null"),
            Self::Node(kind) => write!(f, "node {kind}"),
            Self::Id(id) => write!(f, "id {id}"),
            Self::Value(value) => write!(f, "value {value}"),
            Self::Marker(kind) => write!(f, "marker {kind}"),
            Self::ListHeader { len } => write!(f, "list len={len}"),
            Self::ListRemove(id) => write!(f, "remove {id}"),
            Self::ListInsert { position } => write!(f, "insert @{position}"),
            Self::ListMove { id, position } => write!(f, "move {id} @{position}"),
            Self::ListUpdate(id) => write!(f, "update {id}"),
            Self::ListEnd => f.write_str("end-list"),
            Self::End => f.write_str("end"),
        }
    }
}

impl Item {
    /// The error for reading this item where something else was expected.
    pub fn unexpected(&self, expected: &'static str) -> SyncError {
        Desync::UnexpectedItem { expected, found: self.to_string() }.into()
    }
}

/// Renders a stream one item per line.
pub fn debug_items(items: &[Item]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

/// Producer side of a round. Items are only ever appended.
#[derive(Debug, Default)]
pub struct SendQueue {
    items: Vec<Item>,
}

impl SendQueue {
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn finish(self) -> Vec<Item> {
        self.items
    }
}

/// Consumer side of a round. Items are read strictly in order; the only
/// lookahead is a single `peek`.
pub struct ReceiveQueue<'a> {
    items: Peekable<Box<dyn Iterator<Item = Item> + 'a>>,
    consumed: usize,
}

impl<'a> ReceiveQueue<'a> {
    pub fn new(items: impl IntoIterator<Item = Item> + 'a) -> Self {
        let items: Box<dyn Iterator<Item = Item> + 'a> = Box::new(items.into_iter());
        Self { items: items.peekable(), consumed: 0 }
    }

    pub fn pop(&mut self) -> Result<Item> {
        let item = self.items.next().ok_or(Desync::Truncated)?;
        self.consumed += 1;
        Ok(item)
    }

    pub fn peek(&mut self) -> Result<&Item> {
        Ok(self.items.peek().ok_or(Desync::Truncated)?)
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.items.peek().is_none()
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Size summary of one round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    pub items: usize,
    pub nodes: usize,
    pub unchanged: usize,
    pub changed: usize,
    pub added: usize,
}

impl RoundStats {
    pub fn of(items: &[Item]) -> Self {
        let mut stats = Self { items: items.len(), ..Self::default() };
        for item in items {
            match item {
                Item::Node(_) => stats.nodes += 1,
                Item::NoChange => stats.unchanged += 1,
                Item::Change | Item::ListUpdate(_) | Item::ListMove { .. } => stats.changed += 1,
                Item::Add | Item::ListInsert { .. } => stats.added += 1,
                _ => {}
            }
        }
        stats
    }

    /// True for a round that carried nothing but the framing and one `NoChange`.
    pub fn is_idempotent(&self) -> bool {
        self.items == 3 && self.unchanged == 1
    }
}

impl fmt::Display for RoundStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items, {} nodes, {} changed, {} added, {} unchanged",
            self.items, self.nodes, self.changed, self.added, self.unchanged
        )
    }
}
