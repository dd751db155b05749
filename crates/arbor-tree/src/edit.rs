//! Path-copying edits.
//!
//! Every edit returns a new root. Nodes off the edited path are shared with
//! the input by pointer, so a sender comparing the two versions only walks
//! into the rebuilt spine.

use crate::nodes::*;
use crate::{Container, J, LeftPadded, NodeId, Py, RightPadded, Space, Tree};

struct Mapper<'f> {
    f: &'f mut dyn FnMut(&Tree) -> Tree,
    changed: bool,
}

impl Mapper<'_> {
    fn tree(&mut self, tree: &Tree) -> Tree {
        let mapped = (self.f)(tree);
        self.changed |= !mapped.same(tree);
        mapped
    }

    fn trees(&mut self, trees: &[Tree]) -> Vec<Tree> {
        trees.iter().map(|tree| self.tree(tree)).collect()
    }

    fn optional(&mut self, tree: Option<&Tree>) -> Option<Tree> {
        tree.map(|tree| self.tree(tree))
    }

    fn right(&mut self, padded: &RightPadded<Tree>) -> RightPadded<Tree> {
        RightPadded {
            element: self.tree(&padded.element),
            after: padded.after.clone(),
            markers: padded.markers.clone(),
        }
    }

    fn left(&mut self, padded: &LeftPadded<Tree>) -> LeftPadded<Tree> {
        LeftPadded {
            before: padded.before.clone(),
            element: self.tree(&padded.element),
            markers: padded.markers.clone(),
        }
    }

    fn rights(&mut self, padded: &[RightPadded<Tree>]) -> Vec<RightPadded<Tree>> {
        padded.iter().map(|padded| self.right(padded)).collect()
    }

    fn container(&mut self, container: &Container<Tree>) -> Container<Tree> {
        Container {
            before: container.before.clone(),
            elements: self.rights(&container.elements),
            markers: container.markers.clone(),
        }
    }
}

impl Tree {
    /// Rebuilds this node with every direct child passed through `f`.
    ///
    /// Returns a clone of `self` (same allocation) when `f` returned every
    /// child unchanged.
    pub fn map_children(&self, f: &mut dyn FnMut(&Self) -> Self) -> Self {
        let mut m = Mapper { f, changed: false };

        let rebuilt: Self = match self {
            Self::J(node) => match node {
                J::Identifier(_) | J::Literal(_) | J::Empty(_) => return self.clone(),
                J::CompilationUnit(n) => {
                    CompilationUnit { statements: m.rights(&n.statements), ..(**n).clone() }.into()
                }
                J::Binary(n) => {
                    Binary { left: m.tree(&n.left), right: m.tree(&n.right), ..(**n).clone() }
                        .into()
                }
                J::Unary(n) => Unary { expression: m.tree(&n.expression), ..(**n).clone() }.into(),
                J::Parentheses(n) => Parentheses { tree: m.right(&n.tree), ..(**n).clone() }.into(),
                J::Assignment(n) => Assignment {
                    variable: m.tree(&n.variable),
                    assignment: m.left(&n.assignment),
                    ..(**n).clone()
                }
                .into(),
                J::MethodInvocation(n) => MethodInvocation {
                    select: n.select.as_ref().map(|select| m.right(select)),
                    name: m.tree(&n.name),
                    arguments: m.container(&n.arguments),
                    ..(**n).clone()
                }
                .into(),
                J::Block(n) => Block { statements: m.rights(&n.statements), ..(**n).clone() }.into(),
                J::If(n) => If {
                    condition: m.tree(&n.condition),
                    then_part: m.right(&n.then_part),
                    else_part: n.else_part.as_ref().map(|part| m.left(part)),
                    ..(**n).clone()
                }
                .into(),
                J::Return(n) => {
                    Return { expression: m.optional(n.expression.as_ref()), ..(**n).clone() }.into()
                }
            },
            Self::Py(node) => match node {
                Py::ExpressionStatement(n) => {
                    ExpressionStatement { id: n.id, expression: m.tree(&n.expression) }.into()
                }
                Py::StatementExpression(n) => {
                    StatementExpression { id: n.id, statement: m.tree(&n.statement) }.into()
                }
                Py::KeyValue(n) => {
                    KeyValue { key: m.right(&n.key), value: m.tree(&n.value), ..(**n).clone() }
                        .into()
                }
                Py::Dict(n) => Dict { elements: m.container(&n.elements), ..(**n).clone() }.into(),
                Py::Comprehension(n) => Comprehension {
                    result: m.tree(&n.result),
                    clauses: m.trees(&n.clauses),
                    ..(**n).clone()
                }
                .into(),
                Py::ComprehensionClause(n) => ComprehensionClause {
                    iterator_variable: m.tree(&n.iterator_variable),
                    iterated_list: m.left(&n.iterated_list),
                    conditions: m.trees(&n.conditions),
                    ..(**n).clone()
                }
                .into(),
                Py::ComprehensionCondition(n) => {
                    ComprehensionCondition { expression: m.tree(&n.expression), ..(**n).clone() }
                        .into()
                }
            },
        };

        if m.changed { rebuilt } else { self.clone() }
    }

    /// Replaces the node with the given id, copying only the path to it.
    pub fn replace(&self, id: NodeId, replacement: &Self) -> Self {
        if self.id() == id {
            return replacement.clone();
        }
        self.map_children(&mut |child| child.replace(id, replacement))
    }

    /// Returns this node with a different prefix.
    ///
    /// The wrapper variants own no prefix, so the wrapped child is re-prefixed.
    pub fn with_prefix(&self, prefix: Space) -> Self {
        match self {
            Self::J(node) => match node {
                J::CompilationUnit(n) => CompilationUnit { prefix, ..(**n).clone() }.into(),
                J::Identifier(n) => Identifier { prefix, ..(**n).clone() }.into(),
                J::Literal(n) => Literal { prefix, ..(**n).clone() }.into(),
                J::Binary(n) => Binary { prefix, ..(**n).clone() }.into(),
                J::Unary(n) => Unary { prefix, ..(**n).clone() }.into(),
                J::Parentheses(n) => Parentheses { prefix, ..(**n).clone() }.into(),
                J::Assignment(n) => Assignment { prefix, ..(**n).clone() }.into(),
                J::MethodInvocation(n) => MethodInvocation { prefix, ..(**n).clone() }.into(),
                J::Block(n) => Block { prefix, ..(**n).clone() }.into(),
                J::If(n) => If { prefix, ..(**n).clone() }.into(),
                J::Return(n) => Return { prefix, ..(**n).clone() }.into(),
                J::Empty(n) => Empty { prefix, ..(**n).clone() }.into(),
            },
            Self::Py(node) => match node {
                Py::ExpressionStatement(n) => {
                    ExpressionStatement { id: n.id, expression: n.expression.with_prefix(prefix) }
                        .into()
                }
                Py::StatementExpression(n) => {
                    StatementExpression { id: n.id, statement: n.statement.with_prefix(prefix) }
                        .into()
                }
                Py::KeyValue(n) => KeyValue { prefix, ..(**n).clone() }.into(),
                Py::Dict(n) => Dict { prefix, ..(**n).clone() }.into(),
                Py::Comprehension(n) => Comprehension { prefix, ..(**n).clone() }.into(),
                Py::ComprehensionClause(n) => ComprehensionClause { prefix, ..(**n).clone() }.into(),
                Py::ComprehensionCondition(n) => {
                    ComprehensionCondition { prefix, ..(**n).clone() }.into()
                }
            },
        }
    }
}
