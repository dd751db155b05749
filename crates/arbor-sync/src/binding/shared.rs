//! The core node set, which every language shares.

use std::sync::Arc;

use arbor_errors::{ContractViolation, Desync, Result};
use arbor_tree::nodes::*;
use arbor_tree::{J, Marker, NodeKind, SearchResult, Semicolon, Tree};

use crate::{Item, MarkerCodec, Receiver, Sender};

pub(crate) fn send(node: &J, before: Option<&J>, s: &mut Sender<'_>) -> Result<()> {
    match node {
        J::CompilationUnit(n) => {
            let b = baseline!(before, J::CompilationUnit);
            s.header(&**n, b)?;
            send_fields!(s, n, b; source_path, statements, eof);
        }
        J::Identifier(n) => {
            let b = baseline!(before, J::Identifier);
            s.header(&**n, b)?;
            send_fields!(s, n, b; simple_name);
        }
        J::Literal(n) => {
            let b = baseline!(before, J::Literal);
            s.header(&**n, b)?;
            send_fields!(s, n, b; value, value_source);
        }
        J::Binary(n) => {
            let b = baseline!(before, J::Binary);
            s.header(&**n, b)?;
            send_fields!(s, n, b; left, operator, right);
        }
        J::Unary(n) => {
            let b = baseline!(before, J::Unary);
            s.header(&**n, b)?;
            send_fields!(s, n, b; operator, expression);
        }
        J::Parentheses(n) => {
            let b = baseline!(before, J::Parentheses);
            s.header(&**n, b)?;
            send_fields!(s, n, b; tree);
        }
        J::Assignment(n) => {
            let b = baseline!(before, J::Assignment);
            s.header(&**n, b)?;
            send_fields!(s, n, b; variable, assignment);
        }
        J::MethodInvocation(n) => {
            let b = baseline!(before, J::MethodInvocation);
            s.header(&**n, b)?;
            s.optional(n.select.as_ref(), b.map(|b| b.select.as_ref()))?;
            send_fields!(s, n, b; name, arguments);
        }
        J::Block(n) => {
            let b = baseline!(before, J::Block);
            s.header(&**n, b)?;
            send_fields!(s, n, b; statements, end);
        }
        J::If(n) => {
            let b = baseline!(before, J::If);
            s.header(&**n, b)?;
            send_fields!(s, n, b; condition, then_part);
            s.optional(n.else_part.as_ref(), b.map(|b| b.else_part.as_ref()))?;
        }
        J::Return(n) => {
            let b = baseline!(before, J::Return);
            s.header(&**n, b)?;
            s.optional(n.expression.as_ref(), b.map(|b| b.expression.as_ref()))?;
        }
        J::Empty(n) => {
            let b = baseline!(before, J::Empty);
            s.header(&**n, b)?;
        }
    }
    Ok(())
}

pub(crate) fn receive(kind: NodeKind, before: Option<&J>, r: &mut Receiver<'_>) -> Result<Tree> {
    let tree: Tree = match kind {
        NodeKind::CompilationUnit => {
            let b = baseline!(before, J::CompilationUnit);
            let (id, prefix, markers) = r.header(b)?;
            // The language is the round's, from `Begin`. Below the root a unit
            // fails its parent's role check.
            CompilationUnit {
                id,
                prefix,
                markers,
                language: r.language(),
                source_path: field!(r, b, source_path),
                statements: field!(r, b, statements),
                eof: field!(r, b, eof),
            }
            .into()
        }
        NodeKind::Identifier => {
            let b = baseline!(before, J::Identifier);
            let (id, prefix, markers) = r.header(b)?;
            Identifier { id, prefix, markers, simple_name: field!(r, b, simple_name) }.into()
        }
        NodeKind::Literal => {
            let b = baseline!(before, J::Literal);
            let (id, prefix, markers) = r.header(b)?;
            let value = field!(r, b, value);
            Literal { id, prefix, markers, value, value_source: field!(r, b, value_source) }.into()
        }
        NodeKind::Binary => {
            let b = baseline!(before, J::Binary);
            let (id, prefix, markers) = r.header(b)?;
            Binary {
                id,
                prefix,
                markers,
                left: field!(r, b, left),
                operator: field!(r, b, operator),
                right: field!(r, b, right),
            }
            .into()
        }
        NodeKind::Unary => {
            let b = baseline!(before, J::Unary);
            let (id, prefix, markers) = r.header(b)?;
            let operator = field!(r, b, operator);
            Unary { id, prefix, markers, operator, expression: field!(r, b, expression) }.into()
        }
        NodeKind::Parentheses => {
            let b = baseline!(before, J::Parentheses);
            let (id, prefix, markers) = r.header(b)?;
            Parentheses { id, prefix, markers, tree: field!(r, b, tree) }.into()
        }
        NodeKind::Assignment => {
            let b = baseline!(before, J::Assignment);
            let (id, prefix, markers) = r.header(b)?;
            let variable = field!(r, b, variable);
            Assignment { id, prefix, markers, variable, assignment: field!(r, b, assignment) }.into()
        }
        NodeKind::MethodInvocation => {
            let b = baseline!(before, J::MethodInvocation);
            let (id, prefix, markers) = r.header(b)?;
            MethodInvocation {
                id,
                prefix,
                markers,
                select: r.optional(b.map(|b| b.select.as_ref()))?,
                name: field!(r, b, name),
                arguments: field!(r, b, arguments),
            }
            .into()
        }
        NodeKind::Block => {
            let b = baseline!(before, J::Block);
            let (id, prefix, markers) = r.header(b)?;
            let statements = field!(r, b, statements);
            Block { id, prefix, markers, statements, end: field!(r, b, end) }.into()
        }
        NodeKind::If => {
            let b = baseline!(before, J::If);
            let (id, prefix, markers) = r.header(b)?;
            If {
                id,
                prefix,
                markers,
                condition: field!(r, b, condition),
                then_part: field!(r, b, then_part),
                else_part: r.optional(b.map(|b| b.else_part.as_ref()))?,
            }
            .into()
        }
        NodeKind::Return => {
            let b = baseline!(before, J::Return);
            let (id, prefix, markers) = r.header(b)?;
            let expression = r.optional(b.map(|b| b.expression.as_ref()))?;
            Return { id, prefix, markers, expression }.into()
        }
        NodeKind::Empty => {
            let b = baseline!(before, J::Empty);
            let (id, prefix, markers) = r.header(b)?;
            Empty { id, prefix, markers }.into()
        }
        NodeKind::ExpressionStatement
        | NodeKind::StatementExpression
        | NodeKind::KeyValue
        | NodeKind::Dict
        | NodeKind::Comprehension
        | NodeKind::ComprehensionClause
        | NodeKind::ComprehensionCondition => {
            return Err(Desync::UnknownKind { kind, language: r.language() }.into());
        }
    };
    Ok(tree)
}

pub(crate) fn downcast<'m, M: Marker>(
    marker: &'m dyn Marker,
    expected: &'static str,
) -> Result<&'m M> {
    marker
        .as_any()
        .downcast_ref::<M>()
        .ok_or_else(|| ContractViolation::Marker { marker: marker.kind(), expected }.into())
}

/// Same wire shape in every language: just the id.
pub(crate) const SEMICOLON: MarkerCodec =
    MarkerCodec { encode: encode_semicolon, decode: decode_semicolon };

pub(crate) const SEARCH_RESULT: MarkerCodec =
    MarkerCodec { encode: encode_search_result, decode: decode_search_result };

fn encode_semicolon(marker: &dyn Marker, s: &mut Sender<'_>) -> Result<()> {
    let semicolon = downcast::<Semicolon>(marker, Semicolon::KIND.name())?;
    s.push(Item::Id(semicolon.id));
    Ok(())
}

fn decode_semicolon(r: &mut Receiver<'_>) -> Result<Arc<dyn Marker>> {
    Ok(Arc::new(Semicolon { id: r.id()? }))
}

fn encode_search_result(marker: &dyn Marker, s: &mut Sender<'_>) -> Result<()> {
    let result = downcast::<SearchResult>(marker, SearchResult::KIND.name())?;
    s.push(Item::Id(result.id));
    s.atom(&result.description);
    Ok(())
}

fn decode_search_result(r: &mut Receiver<'_>) -> Result<Arc<dyn Marker>> {
    let id = r.id()?;
    Ok(Arc::new(SearchResult { id, description: r.atom()? }))
}
