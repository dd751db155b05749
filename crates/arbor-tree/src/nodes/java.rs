//! The shared core node set.

use super::named_enum;
use crate::{Container, Language, LeftPadded, Markers, NodeId, RightPadded, Space, Tree};

#[derive(Clone, Debug, PartialEq)]
pub struct CompilationUnit {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub language: Language,
    pub source_path: String,
    pub statements: Vec<RightPadded<Tree>>,
    pub eof: Space,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub simple_name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub value: LiteralValue,
    /// The literal exactly as written, e.g. `0x1F` or `'a'`.
    pub value_source: String,
}

named_enum! {
    pub enum BinaryOperator {
        Addition,
        Subtraction,
        Multiplication,
        Division,
        Modulo,
        LessThan,
        GreaterThan,
        LessThanOrEqual,
        GreaterThanOrEqual,
        Equal,
        NotEqual,
        And,
        Or,
    }
}

named_enum! {
    pub enum UnaryOperator {
        Negative,
        Positive,
        Not,
        Complement,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binary {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub left: Tree,
    pub operator: LeftPadded<BinaryOperator>,
    pub right: Tree,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Unary {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub operator: LeftPadded<UnaryOperator>,
    pub expression: Tree,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parentheses {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub tree: RightPadded<Tree>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub variable: Tree,
    pub assignment: LeftPadded<Tree>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodInvocation {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub select: Option<RightPadded<Tree>>,
    pub name: Tree,
    pub arguments: Container<Tree>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub statements: Vec<RightPadded<Tree>>,
    /// Space before the closing brace.
    pub end: Space,
}

#[derive(Clone, Debug, PartialEq)]
pub struct If {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub condition: Tree,
    pub then_part: RightPadded<Tree>,
    pub else_part: Option<LeftPadded<Tree>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
    pub expression: Option<Tree>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Empty {
    pub id: NodeId,
    pub prefix: Space,
    pub markers: Markers,
}
