//! Java: the core node set with text comments.

use std::sync::Arc;

use arbor_errors::{ConfigError, ContractViolation, Desync, Result, SyncError};
use arbor_tree::{
    Comment, Language, Marker, NodeKind, Py, SearchResult, Semicolon, Space, TextComment,
    TrailingComma, Tree,
};

use super::shared;
use crate::{Item, MarkerCodec, Receiver, RegistryBuilder, Sender, SpaceCodec, Value};

pub(crate) fn send(tree: &Tree, before: Option<&Tree>, s: &mut Sender<'_>) -> Result<()> {
    match tree {
        Tree::J(node) => shared::send(node, before.and_then(Tree::as_j), s),
        Tree::Py(node) => Err(foreign(node)),
    }
}

fn foreign(node: &Py) -> SyncError {
    ContractViolation::Foreign { node: node.id(), kind: node.kind(), language: Language::Java }
        .into()
}

pub(crate) fn receive(kind: NodeKind, before: Option<&Tree>, r: &mut Receiver<'_>) -> Result<Tree> {
    if kind.is_python() {
        return Err(Desync::UnknownKind { kind, language: Language::Java }.into());
    }
    shared::receive(kind, before.and_then(Tree::as_j), r)
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder, ConfigError> {
    builder
        .space(Language::Java, SPACE)?
        .marker(TrailingComma::KIND, Language::Java, TRAILING_COMMA)?
        .marker(Semicolon::KIND, Language::Java, shared::SEMICOLON)?
        .marker(SearchResult::KIND, Language::Java, shared::SEARCH_RESULT)
}

/// Whitespace, comment count, then `text, multiline, suffix` per comment.
pub(crate) const SPACE: SpaceCodec = SpaceCodec { encode: encode_space, decode: decode_space };

/// Id and the suffix whitespace. Java cannot put a comment after a trailing comma.
pub(crate) const TRAILING_COMMA: MarkerCodec =
    MarkerCodec { encode: encode_trailing_comma, decode: decode_trailing_comma };

fn encode_space(space: &Space, s: &mut Sender<'_>) -> Result<()> {
    s.atom(&space.whitespace);
    s.atom(&space.comments.len());
    for comment in &space.comments {
        let Comment::Text(comment) = comment else {
            let comment = comment.variant();
            return Err(ContractViolation::Comment { language: Language::Java, comment }.into());
        };
        s.atom(&comment.text);
        s.atom(&comment.multiline);
        s.atom(&comment.suffix);
    }
    Ok(())
}

fn decode_space(r: &mut Receiver<'_>) -> Result<Space> {
    let whitespace = r.atom()?;
    let count: usize = r.atom()?;
    let mut comments = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let text = r.atom()?;
        let multiline = r.atom()?;
        comments.push(Comment::Text(TextComment { text, multiline, suffix: r.atom()? }));
    }
    Ok(Space { whitespace, comments })
}

fn encode_trailing_comma(marker: &dyn Marker, s: &mut Sender<'_>) -> Result<()> {
    let comma = shared::downcast::<TrailingComma>(marker, TrailingComma::KIND.name())?;
    if let Some(comment) = comma.suffix.comments.first() {
        let comment = comment.variant();
        return Err(ContractViolation::Comment { language: Language::Java, comment }.into());
    }
    s.push(Item::Id(comma.id));
    s.value(Value::Str(comma.suffix.whitespace.clone()));
    Ok(())
}

fn decode_trailing_comma(r: &mut Receiver<'_>) -> Result<Arc<dyn Marker>> {
    let id = r.id()?;
    let whitespace: String = r.atom()?;
    Ok(Arc::new(TrailingComma { id, suffix: Space::format(whitespace) }))
}
