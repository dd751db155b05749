/// Declares a fieldless enum carried on the wire by its variant name.
macro_rules! named_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|candidate| candidate.name() == name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use named_enum;

mod java;
mod python;

pub use java::{
    Assignment, Binary, BinaryOperator, Block, CompilationUnit, Empty, Identifier, If, Literal,
    LiteralValue, MethodInvocation, Parentheses, Return, Unary, UnaryOperator,
};
pub use python::{
    Comprehension, ComprehensionClause, ComprehensionCondition, ComprehensionKind, Dict,
    ExpressionStatement, KeyValue, StatementExpression,
};
