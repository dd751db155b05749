//! Failures of a synchronization round.
//!
//! Every error aborts the round it occurred in. No partially reconstructed
//! tree is ever returned, and both endpoints fall back to a full round.

use arbor_tree::{Language, MarkerKind, NodeId, NodeKind, Role};
use thiserror::Error;

/// The item stream does not match what the receiving side expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Desync {
    #[error("item stream ended early")]
    Truncated,
    #[error("expected {expected}, found `{found}`")]
    UnexpectedItem { expected: &'static str, found: String },
    #[error("no {language} node has kind {kind}")]
    UnknownKind { kind: NodeKind, language: Language },
    #[error("no {language} codec for marker `{kind}`")]
    UnknownMarker { kind: String, language: Language },
    #[error("list operation refers to {0}, which is not in the baseline list")]
    UnknownListKey(NodeId),
    #[error("{0} appears twice in one list")]
    DuplicateListKey(NodeId),
    #[error("{0} is updated in place and also removed, moved or updated again")]
    ConflictingListOps(NodeId),
    #[error("`{0}` requires a baseline value, but there is none")]
    MissingBaseline(&'static str),
    #[error("list position {position} is out of range")]
    ListPosition { position: u32 },
    #[error("list of {expected} elements left unfilled slots")]
    ListShape { expected: u32 },
    #[error("items follow the end of the round")]
    TrailingItems,
    #[error("`{value}` is not a valid {expected}")]
    InvalidValue { expected: &'static str, value: String },
}

/// A decoded or encoded value has the wrong type for its position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("{node} is a {actual}, but `{field}` requires {expected}")]
    Role { node: NodeId, actual: NodeKind, expected: Role, field: String },
    #[error("{node} is a {kind}, which {language} trees cannot contain")]
    Foreign { node: NodeId, kind: NodeKind, language: Language },
    #[error("{language} cannot encode a {comment}")]
    Comment { language: Language, comment: &'static str },
    #[error("marker `{marker}` is not a {expected}")]
    Marker { marker: MarkerKind, expected: &'static str },
}

/// The codec registry is incomplete or ambiguous.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no space codec registered for {0}")]
    MissingSpaceCodec(Language),
    #[error("no codec for marker `{kind}` in {language}")]
    MissingMarkerCodec { kind: MarkerKind, language: Language },
    #[error("space codec for {0} registered twice")]
    DuplicateSpaceCodec(Language),
    #[error("codec for marker `{kind}` in {language} registered twice")]
    DuplicateMarkerCodec { kind: MarkerKind, language: Language },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("protocol desync: {0}")]
    Desync(#[from] Desync),
    #[error("type contract violated: {0}")]
    Contract(#[from] ContractViolation),
    #[error("codec registry misconfigured: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ProtocolDesync,
    TypeContract,
    Configuration,
}

impl SyncError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Desync(_) => ErrorKind::ProtocolDesync,
            Self::Contract(_) => ErrorKind::TypeContract,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
