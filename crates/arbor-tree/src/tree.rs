use triomphe::Arc;

use crate::nodes::*;
use crate::{Language, Markers, NodeId, NodeKind, RightPadded, Role, RoleSet, Space};

/// Accessors shared by every node payload.
pub trait Node {
    const KIND: NodeKind;

    fn id(&self) -> NodeId;

    fn prefix(&self) -> &Space;

    fn markers(&self) -> &Markers;
}

/// A node of any supported language.
#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    J(J),
    Py(Py),
}

macro_rules! node_set {
    ($(#[$meta:meta])* $set:ident in $tree:ident { $($name:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $set {
            $($name(Arc<$name>)),*
        }

        impl $set {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Self::$name(_) => NodeKind::$name),*
                }
            }

            pub fn id(&self) -> NodeId {
                match self {
                    $(Self::$name(node) => node.id()),*
                }
            }

            pub fn prefix(&self) -> &Space {
                match self {
                    $(Self::$name(node) => node.prefix()),*
                }
            }

            pub fn markers(&self) -> &Markers {
                match self {
                    $(Self::$name(node) => node.markers()),*
                }
            }

            fn same(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Self::$name(a), Self::$name(b)) => Arc::ptr_eq(a, b),)*
                    _ => false,
                }
            }
        }

        $(
            impl From<$name> for Tree {
                fn from(node: $name) -> Self {
                    Self::$tree($set::$name(Arc::new(node)))
                }
            }

            impl From<Arc<$name>> for Tree {
                fn from(node: Arc<$name>) -> Self {
                    Self::$tree($set::$name(node))
                }
            }
        )*
    };
}

node_set! {
    /// The shared core variants.
    J in J {
        CompilationUnit,
        Identifier,
        Literal,
        Binary,
        Unary,
        Parentheses,
        Assignment,
        MethodInvocation,
        Block,
        If,
        Return,
        Empty,
    }
}

node_set! {
    /// Variants only Python trees carry.
    Py in Py {
        ExpressionStatement,
        StatementExpression,
        KeyValue,
        Dict,
        Comprehension,
        ComprehensionClause,
        ComprehensionCondition,
    }
}

macro_rules! impl_node {
    ($($name:ident),* $(,)?) => {
        $(
            impl Node for $name {
                const KIND: NodeKind = NodeKind::$name;

                fn id(&self) -> NodeId {
                    self.id
                }

                fn prefix(&self) -> &Space {
                    &self.prefix
                }

                fn markers(&self) -> &Markers {
                    &self.markers
                }
            }
        )*
    };
}

impl_node!(
    CompilationUnit,
    Identifier,
    Literal,
    Binary,
    Unary,
    Parentheses,
    Assignment,
    MethodInvocation,
    Block,
    If,
    Return,
    Empty,
    KeyValue,
    Dict,
    Comprehension,
    ComprehensionClause,
    ComprehensionCondition,
);

impl Node for ExpressionStatement {
    const KIND: NodeKind = NodeKind::ExpressionStatement;

    fn id(&self) -> NodeId {
        self.id
    }

    fn prefix(&self) -> &Space {
        self.expression.prefix()
    }

    fn markers(&self) -> &Markers {
        self.expression.markers()
    }
}

impl Node for StatementExpression {
    const KIND: NodeKind = NodeKind::StatementExpression;

    fn id(&self) -> NodeId {
        self.id
    }

    fn prefix(&self) -> &Space {
        self.statement.prefix()
    }

    fn markers(&self) -> &Markers {
        self.statement.markers()
    }
}

/// A child position: which field holds `tree` and what that field requires.
#[derive(Clone, Copy, Debug)]
pub struct Slot<'a> {
    pub field: &'static str,
    /// Position within the field, for sequence fields.
    pub index: Option<usize>,
    pub role: Role,
    pub tree: &'a Tree,
}

#[derive(Default)]
struct Slots<'a>(Vec<Slot<'a>>);

impl<'a> Slots<'a> {
    fn one(&mut self, field: &'static str, role: Role, tree: &'a Tree) {
        self.0.push(Slot { field, index: None, role, tree });
    }

    fn many(&mut self, field: &'static str, role: Role, trees: &'a [Tree]) {
        let slots = trees.iter().enumerate();
        self.0.extend(slots.map(|(index, tree)| Slot { field, index: Some(index), role, tree }));
    }

    fn padded(&mut self, field: &'static str, role: Role, trees: &'a [RightPadded<Tree>]) {
        let slots = trees.iter().enumerate();
        self.0.extend(slots.map(|(index, padded)| Slot {
            field,
            index: Some(index),
            role,
            tree: &padded.element,
        }));
    }
}

impl Tree {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::J(node) => node.kind(),
            Self::Py(node) => node.kind(),
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::J(node) => node.id(),
            Self::Py(node) => node.id(),
        }
    }

    pub fn prefix(&self) -> &Space {
        match self {
            Self::J(node) => node.prefix(),
            Self::Py(node) => node.prefix(),
        }
    }

    pub fn markers(&self) -> &Markers {
        match self {
            Self::J(node) => node.markers(),
            Self::Py(node) => node.markers(),
        }
    }

    pub fn roles(&self) -> RoleSet {
        self.kind().roles()
    }

    /// The declared language, if this is a compilation unit.
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::J(J::CompilationUnit(unit)) => Some(unit.language),
            _ => None,
        }
    }

    /// Identity comparison: true when both point at the same allocation.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::J(a), Self::J(b)) => a.same(b),
            (Self::Py(a), Self::Py(b)) => a.same(b),
            _ => false,
        }
    }

    pub fn as_j(&self) -> Option<&J> {
        match self {
            Self::J(node) => Some(node),
            Self::Py(_) => None,
        }
    }

    pub fn as_py(&self) -> Option<&Py> {
        match self {
            Self::J(_) => None,
            Self::Py(node) => Some(node),
        }
    }

    /// Direct children in field order, each with the role its field requires.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        let mut slots = Slots::default();
        match self {
            Self::J(node) => match node {
                J::CompilationUnit(unit) => {
                    slots.padded("statements", Role::Statement, &unit.statements);
                }
                J::Identifier(_) | J::Literal(_) | J::Empty(_) => {}
                J::Binary(binary) => {
                    slots.one("left", Role::Expression, &binary.left);
                    slots.one("right", Role::Expression, &binary.right);
                }
                J::Unary(unary) => slots.one("expression", Role::Expression, &unary.expression),
                J::Parentheses(parens) => {
                    slots.one("tree", Role::Expression, &parens.tree.element);
                }
                J::Assignment(assign) => {
                    slots.one("variable", Role::Expression, &assign.variable);
                    slots.one("assignment", Role::Expression, &assign.assignment.element);
                }
                J::MethodInvocation(call) => {
                    if let Some(select) = &call.select {
                        slots.one("select", Role::Expression, &select.element);
                    }
                    slots.one("name", Role::Identifier, &call.name);
                    slots.padded("arguments", Role::Expression, &call.arguments.elements);
                }
                J::Block(block) => slots.padded("statements", Role::Statement, &block.statements),
                J::If(if_) => {
                    slots.one("condition", Role::Expression, &if_.condition);
                    slots.one("then_part", Role::Statement, &if_.then_part.element);
                    if let Some(else_part) = &if_.else_part {
                        slots.one("else_part", Role::Statement, &else_part.element);
                    }
                }
                J::Return(ret) => {
                    if let Some(expression) = &ret.expression {
                        slots.one("expression", Role::Expression, expression);
                    }
                }
            },
            Self::Py(node) => match node {
                Py::ExpressionStatement(stmt) => {
                    slots.one("expression", Role::Expression, &stmt.expression);
                }
                Py::StatementExpression(expr) => {
                    slots.one("statement", Role::Statement, &expr.statement);
                }
                Py::KeyValue(kv) => {
                    slots.one("key", Role::Expression, &kv.key.element);
                    slots.one("value", Role::Expression, &kv.value);
                }
                Py::Dict(dict) => slots.padded("elements", Role::Expression, &dict.elements.elements),
                Py::Comprehension(comp) => {
                    slots.one("result", Role::Expression, &comp.result);
                    slots.many("clauses", Role::ComprehensionClause, &comp.clauses);
                }
                Py::ComprehensionClause(clause) => {
                    slots.one("iterator_variable", Role::Expression, &clause.iterator_variable);
                    slots.one("iterated_list", Role::Expression, &clause.iterated_list.element);
                    slots.many("conditions", Role::ComprehensionCondition, &clause.conditions);
                }
                Py::ComprehensionCondition(cond) => {
                    slots.one("expression", Role::Expression, &cond.expression);
                }
            },
        }
        slots.0
    }

    /// Direct child nodes in field order.
    pub fn children(&self) -> Vec<&Self> {
        self.slots().into_iter().map(|slot| slot.tree).collect()
    }

    pub fn find(&self, id: NodeId) -> Option<&Self> {
        if self.id() == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in the tree rooted here.
    pub fn count(&self) -> usize {
        1 + self.children().into_iter().map(Self::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use crate::nodes::BinaryOperator;
    use crate::{Language, NodeKind, Role, TreeBuilder};

    #[test]
    fn wrapper_delegates_prefix() {
        let mut b = TreeBuilder::new();
        let name = b.identifier("x");
        let stmt = b.expression_statement(name.clone());

        assert_eq!(stmt.kind(), NodeKind::ExpressionStatement);
        assert_eq!(stmt.prefix(), name.prefix());
        assert_ne!(stmt.id(), name.id());
    }

    #[test]
    fn find_and_count() {
        let mut b = TreeBuilder::new();
        let one = b.int(1);
        let two = b.int(2);
        let sum = b.binary(one, BinaryOperator::Addition, two.clone());
        let stmt = b.expression_statement(sum);
        let unit = b.compilation_unit(Language::Python, "a.py", vec![stmt]);

        assert_eq!(unit.count(), 5);
        assert_eq!(unit.find(two.id()).map(|node| node.kind()), Some(NodeKind::Literal));
        assert_eq!(unit.language(), Some(Language::Python));
    }

    #[test]
    fn slots_carry_field_roles() {
        let mut b = TreeBuilder::new();
        let key = b.string("k");
        let value = b.int(1);
        let entry = b.key_value(key, value);
        let dict = b.dict(vec![entry]);

        let slots = dict.slots();
        assert_eq!(slots.len(), 1);
        assert_eq!((slots[0].field, slots[0].index), ("elements", Some(0)));
        assert_eq!(slots[0].role, Role::Expression);

        let inner = slots[0].tree.slots();
        let fields: Vec<_> = inner.iter().map(|slot| slot.field).collect();
        assert_eq!(fields, ["key", "value"]);
    }

    #[test]
    fn clones_are_the_same() {
        let mut b = TreeBuilder::new();
        let a = b.identifier("a");
        let copy = b.identifier("a");

        assert!(a.same(&a.clone()));
        assert!(!a.same(&copy));
    }
}
