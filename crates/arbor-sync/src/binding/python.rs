//! Python: the core node set plus `Py` variants, with Python comments.

use std::sync::Arc;

use arbor_errors::{ConfigError, ContractViolation, Result};
use arbor_tree::nodes::*;
use arbor_tree::{
    Comment, Language, Marker, NodeKind, Py, PyComment, SearchResult, Semicolon, Space,
    TrailingComma, Tree,
};

use super::shared;
use crate::{Item, MarkerCodec, Receiver, RegistryBuilder, Sender, SpaceCodec};

pub(crate) fn send(tree: &Tree, before: Option<&Tree>, s: &mut Sender<'_>) -> Result<()> {
    let node = match tree {
        Tree::J(node) => return shared::send(node, before.and_then(Tree::as_j), s),
        Tree::Py(node) => node,
    };
    let before = before.and_then(Tree::as_py);

    match node {
        // The wrappers carry no prefix or markers of their own.
        Py::ExpressionStatement(n) => {
            let b = baseline!(before, Py::ExpressionStatement);
            s.push(Item::Id(n.id));
            send_fields!(s, n, b; expression);
        }
        Py::StatementExpression(n) => {
            let b = baseline!(before, Py::StatementExpression);
            s.push(Item::Id(n.id));
            send_fields!(s, n, b; statement);
        }
        Py::KeyValue(n) => {
            let b = baseline!(before, Py::KeyValue);
            s.header(&**n, b)?;
            send_fields!(s, n, b; key, value);
        }
        Py::Dict(n) => {
            let b = baseline!(before, Py::Dict);
            s.header(&**n, b)?;
            send_fields!(s, n, b; elements);
        }
        Py::Comprehension(n) => {
            let b = baseline!(before, Py::Comprehension);
            s.header(&**n, b)?;
            send_fields!(s, n, b; kind, result, clauses, suffix);
        }
        Py::ComprehensionClause(n) => {
            let b = baseline!(before, Py::ComprehensionClause);
            s.header(&**n, b)?;
            send_fields!(s, n, b; iterator_variable, iterated_list, conditions);
        }
        Py::ComprehensionCondition(n) => {
            let b = baseline!(before, Py::ComprehensionCondition);
            s.header(&**n, b)?;
            send_fields!(s, n, b; expression);
        }
    }
    Ok(())
}

pub(crate) fn receive(kind: NodeKind, before: Option<&Tree>, r: &mut Receiver<'_>) -> Result<Tree> {
    let py = before.and_then(Tree::as_py);

    let tree: Tree = match kind {
        NodeKind::ExpressionStatement => {
            let b = baseline!(py, Py::ExpressionStatement);
            let id = r.id()?;
            ExpressionStatement { id, expression: field!(r, b, expression) }.into()
        }
        NodeKind::StatementExpression => {
            let b = baseline!(py, Py::StatementExpression);
            let id = r.id()?;
            StatementExpression { id, statement: field!(r, b, statement) }.into()
        }
        NodeKind::KeyValue => {
            let b = baseline!(py, Py::KeyValue);
            let (id, prefix, markers) = r.header(b)?;
            let key = field!(r, b, key);
            KeyValue { id, prefix, markers, key, value: field!(r, b, value) }.into()
        }
        NodeKind::Dict => {
            let b = baseline!(py, Py::Dict);
            let (id, prefix, markers) = r.header(b)?;
            Dict { id, prefix, markers, elements: field!(r, b, elements) }.into()
        }
        NodeKind::Comprehension => {
            let b = baseline!(py, Py::Comprehension);
            let (id, prefix, markers) = r.header(b)?;
            Comprehension {
                id,
                prefix,
                markers,
                kind: field!(r, b, kind),
                result: field!(r, b, result),
                clauses: field!(r, b, clauses),
                suffix: field!(r, b, suffix),
            }
            .into()
        }
        NodeKind::ComprehensionClause => {
            let b = baseline!(py, Py::ComprehensionClause);
            let (id, prefix, markers) = r.header(b)?;
            ComprehensionClause {
                id,
                prefix,
                markers,
                iterator_variable: field!(r, b, iterator_variable),
                iterated_list: field!(r, b, iterated_list),
                conditions: field!(r, b, conditions),
            }
            .into()
        }
        NodeKind::ComprehensionCondition => {
            let b = baseline!(py, Py::ComprehensionCondition);
            let (id, prefix, markers) = r.header(b)?;
            ComprehensionCondition { id, prefix, markers, expression: field!(r, b, expression) }
                .into()
        }
        _ => return shared::receive(kind, before.and_then(Tree::as_j), r),
    };
    Ok(tree)
}

pub(crate) fn register(builder: RegistryBuilder) -> Result<RegistryBuilder, ConfigError> {
    builder
        .space(Language::Python, SPACE)?
        .marker(TrailingComma::KIND, Language::Python, TRAILING_COMMA)?
        .marker(Semicolon::KIND, Language::Python, shared::SEMICOLON)?
        .marker(SearchResult::KIND, Language::Python, shared::SEARCH_RESULT)
}

/// Whitespace, comment count, then `text, suffix, aligned_to_indent` per comment.
pub(crate) const SPACE: SpaceCodec = SpaceCodec { encode: encode_space, decode: decode_space };

/// Id and the full Python encoding of the suffix, comments included.
pub(crate) const TRAILING_COMMA: MarkerCodec =
    MarkerCodec { encode: encode_trailing_comma, decode: decode_trailing_comma };

fn encode_space(space: &Space, s: &mut Sender<'_>) -> Result<()> {
    s.atom(&space.whitespace);
    s.atom(&space.comments.len());
    for comment in &space.comments {
        let Comment::Python(comment) = comment else {
            let comment = comment.variant();
            return Err(ContractViolation::Comment { language: Language::Python, comment }.into());
        };
        s.atom(&comment.text);
        s.atom(&comment.suffix);
        s.atom(&comment.aligned_to_indent);
    }
    Ok(())
}

fn decode_space(r: &mut Receiver<'_>) -> Result<Space> {
    let whitespace = r.atom()?;
    let count: usize = r.atom()?;
    let mut comments = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let text = r.atom()?;
        let suffix = r.atom()?;
        comments.push(Comment::Python(PyComment { text, suffix, aligned_to_indent: r.atom()? }));
    }
    Ok(Space { whitespace, comments })
}

fn encode_trailing_comma(marker: &dyn Marker, s: &mut Sender<'_>) -> Result<()> {
    let comma = shared::downcast::<TrailingComma>(marker, TrailingComma::KIND.name())?;
    s.push(Item::Id(comma.id));
    encode_space(&comma.suffix, s)
}

fn decode_trailing_comma(r: &mut Receiver<'_>) -> Result<Arc<dyn Marker>> {
    let id = r.id()?;
    Ok(Arc::new(TrailingComma { id, suffix: decode_space(r)? }))
}
