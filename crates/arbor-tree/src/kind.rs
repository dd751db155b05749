use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RoleSet;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
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

    ExpressionStatement,
    StatementExpression,
    KeyValue,
    Dict,
    Comprehension,
    ComprehensionClause,
    ComprehensionCondition,
}

/// What a field requires of the node occupying it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    SourceFile,
    Expression,
    Statement,
    Identifier,
    ComprehensionClause,
    ComprehensionCondition,
}

const EXPRESSION: RoleSet = RoleSet::new([Role::Expression]);
const STATEMENT: RoleSet = RoleSet::new([Role::Statement]);
const EXPRESSION_STATEMENT: RoleSet = RoleSet::new([Role::Expression, Role::Statement]);

impl NodeKind {
    pub const fn roles(self) -> RoleSet {
        match self {
            Self::CompilationUnit => RoleSet::new([Role::SourceFile]),
            Self::Identifier => RoleSet::new([Role::Expression, Role::Identifier]),
            Self::Literal
            | Self::Binary
            | Self::Unary
            | Self::Parentheses
            | Self::StatementExpression
            | Self::KeyValue
            | Self::Dict
            | Self::Comprehension => EXPRESSION,
            Self::Assignment | Self::MethodInvocation | Self::Empty => EXPRESSION_STATEMENT,
            Self::Block | Self::If | Self::Return | Self::ExpressionStatement => STATEMENT,
            Self::ComprehensionClause => RoleSet::new([Role::ComprehensionClause]),
            Self::ComprehensionCondition => RoleSet::new([Role::ComprehensionCondition]),
        }
    }

    pub const fn has_role(self, role: Role) -> bool {
        self.roles().contains(role)
    }

    /// Whether the variant exists only in Python trees.
    pub const fn is_python(self) -> bool {
        matches!(
            self,
            Self::ExpressionStatement
                | Self::StatementExpression
                | Self::KeyValue
                | Self::Dict
                | Self::Comprehension
                | Self::ComprehensionClause
                | Self::ComprehensionCondition
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
