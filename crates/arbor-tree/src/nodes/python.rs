use super::named_enum;
use crate::{Container, LeftPadded, Markers, NodeId, RightPadded, Space, Tree};

/// An expression used where a statement is expected.
///
/// Carries no prefix or markers of its own: both belong to the wrapped expression.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub expression: Tree,
}

/// A statement used where an expression is expected, e.g. the walrus form.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementExpression {
    pub id: NodeId,
    pub statement: Tree,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub key: RightPadded<Tree>,
    pub value: Tree,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dict {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub elements: Container<Tree>,
}

named_enum! {
    pub enum ComprehensionKind {
        List,
        Set,
        Dict,
        Generator,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comprehension {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub kind: ComprehensionKind,
    pub result: Tree,
    pub clauses: Vec<Tree>,
    /// Space before the closing bracket.
    pub suffix: Space,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComprehensionClause {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub iterator_variable: Tree,
    /// The iterable, padded by the space before `in`.
    pub iterated_list: LeftPadded<Tree>,
    pub conditions: Vec<Tree>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComprehensionCondition {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub expression: Tree,
}
