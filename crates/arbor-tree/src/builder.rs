use crate::nodes::*;
use crate::{Container, Language, LeftPadded, Markers, NodeId, RightPadded, Space, Tree};

/// Builds trees with sequential ids and conventional single-space formatting.
///
/// Ids start at 1 and are handed out in call order, so children built first
/// get the smaller ids.
#[derive(Debug)]
pub struct TreeBuilder {
    next: u64,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn space() -> Space {
    Space::format(" ")
}

fn separated(elements: Vec<Tree>) -> Vec<RightPadded<Tree>> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let element = if index == 0 { element } else { element.with_prefix(space()) };
            RightPadded::build(element)
        })
        .collect()
}

fn lines(statements: Vec<Tree>) -> Vec<RightPadded<Tree>> {
    statements
        .into_iter()
        .enumerate()
        .map(|(index, statement)| {
            let statement =
                if index == 0 { statement } else { statement.with_prefix(Space::format("\n")) };
            RightPadded::build(statement)
        })
        .collect()
}

impl TreeBuilder {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn id(&mut self) -> NodeId {
        let id = NodeId::from_raw(self.next);
        self.next += 1;
        id
    }

    pub fn compilation_unit(
        &mut self,
        language: Language,
        source_path: impl Into<String>,
        statements: Vec<Tree>,
    ) -> Tree {
        CompilationUnit {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            language,
            source_path: source_path.into(),
            statements: lines(statements),
            eof: Space::format("\n"),
        }
        .into()
    }

    pub fn identifier(&mut self, simple_name: impl Into<String>) -> Tree {
        let id = self.id();
        Identifier { id, prefix: Space::EMPTY, markers: Markers::EMPTY, simple_name: simple_name.into() }
            .into()
    }

    pub fn literal(&mut self, value: LiteralValue, value_source: impl Into<String>) -> Tree {
        let id = self.id();
        Self::literal_with_id(id, value, value_source)
    }

    /// A literal reusing an existing id, as an edit of that literal would.
    pub fn literal_with_id(
        id: NodeId,
        value: LiteralValue,
        value_source: impl Into<String>,
    ) -> Tree {
        let value_source = value_source.into();
        Literal { id, prefix: Space::EMPTY, markers: Markers::EMPTY, value, value_source }.into()
    }

    pub fn int(&mut self, value: i64) -> Tree {
        self.literal(LiteralValue::Int(value), value.to_string())
    }

    pub fn int_with_id(id: NodeId, value: i64) -> Tree {
        Self::literal_with_id(id, LiteralValue::Int(value), value.to_string())
    }

    pub fn string(&mut self, value: &str) -> Tree {
        self.literal(LiteralValue::Str(value.to_owned()), format!("'{value}'"))
    }

    pub fn bool(&mut self, value: bool) -> Tree {
        self.literal(LiteralValue::Bool(value), if value { "True" } else { "False" })
    }

    pub fn binary(&mut self, left: Tree, operator: BinaryOperator, right: Tree) -> Tree {
        Binary {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            left,
            operator: LeftPadded::build(operator).with_before(space()),
            right: right.with_prefix(space()),
        }
        .into()
    }

    pub fn unary(&mut self, operator: UnaryOperator, expression: Tree) -> Tree {
        Unary {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            operator: LeftPadded::build(operator),
            expression,
        }
        .into()
    }

    pub fn parentheses(&mut self, tree: Tree) -> Tree {
        let id = self.id();
        Parentheses { id, prefix: Space::EMPTY, markers: Markers::EMPTY, tree: RightPadded::build(tree) }
            .into()
    }

    pub fn assignment(&mut self, variable: Tree, value: Tree) -> Tree {
        Assignment {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            variable,
            assignment: LeftPadded::build(value.with_prefix(space())).with_before(space()),
        }
        .into()
    }

    pub fn method_invocation(
        &mut self,
        select: Option<Tree>,
        name: &str,
        arguments: Vec<Tree>,
    ) -> Tree {
        let name = self.identifier(name);
        MethodInvocation {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            select: select.map(RightPadded::build),
            name,
            arguments: Container::build(separated(arguments)),
        }
        .into()
    }

    pub fn block(&mut self, statements: Vec<Tree>) -> Tree {
        let statements = lines(statements);
        let id = self.id();
        Block { id, prefix: space(), markers: Markers::EMPTY, statements, end: Space::format("\n") }
            .into()
    }

    pub fn if_(&mut self, condition: Tree, then_part: Tree, else_part: Option<Tree>) -> Tree {
        If {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            condition: condition.with_prefix(space()),
            then_part: RightPadded::build(then_part),
            else_part: else_part.map(|part| LeftPadded::build(part).with_before(space())),
        }
        .into()
    }

    pub fn return_(&mut self, expression: Option<Tree>) -> Tree {
        let id = self.id();
        let expression = expression.map(|expression| expression.with_prefix(space()));
        Return { id, prefix: Space::EMPTY, markers: Markers::EMPTY, expression }.into()
    }

    pub fn empty(&mut self) -> Tree {
        Empty { id: self.id(), prefix: Space::EMPTY, markers: Markers::EMPTY }.into()
    }

    pub fn expression_statement(&mut self, expression: Tree) -> Tree {
        ExpressionStatement { id: self.id(), expression }.into()
    }

    pub fn statement_expression(&mut self, statement: Tree) -> Tree {
        StatementExpression { id: self.id(), statement }.into()
    }

    pub fn key_value(&mut self, key: Tree, value: Tree) -> Tree {
        KeyValue {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            key: RightPadded::build(key),
            value: value.with_prefix(space()),
        }
        .into()
    }

    pub fn dict(&mut self, elements: Vec<Tree>) -> Tree {
        let elements = Container::build(separated(elements));
        Dict { id: self.id(), prefix: Space::EMPTY, markers: Markers::EMPTY, elements }.into()
    }

    pub fn comprehension(
        &mut self,
        kind: ComprehensionKind,
        result: Tree,
        clauses: Vec<Tree>,
    ) -> Tree {
        Comprehension {
            id: self.id(),
            prefix: Space::EMPTY,
            markers: Markers::EMPTY,
            kind,
            result,
            clauses,
            suffix: Space::EMPTY,
        }
        .into()
    }

    pub fn comprehension_clause(
        &mut self,
        iterator_variable: Tree,
        iterated_list: Tree,
        conditions: Vec<Tree>,
    ) -> Tree {
        ComprehensionClause {
            id: self.id(),
            prefix: space(),
            markers: Markers::EMPTY,
            iterator_variable: iterator_variable.with_prefix(space()),
            iterated_list: LeftPadded::build(iterated_list.with_prefix(space()))
                .with_before(space()),
            conditions,
        }
        .into()
    }

    pub fn comprehension_condition(&mut self, expression: Tree) -> Tree {
        ComprehensionCondition {
            id: self.id(),
            prefix: space(),
            markers: Markers::EMPTY,
            expression: expression.with_prefix(space()),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::TreeBuilder;
    use crate::NodeId;
    use crate::nodes::BinaryOperator;

    #[test]
    fn ids_follow_call_order() {
        let mut b = TreeBuilder::new();
        let one = b.int(1);
        let two = b.int(2);
        let sum = b.binary(one, BinaryOperator::Addition, two);

        assert_eq!(sum.id(), NodeId::from_raw(3));
        assert_eq!(sum.children()[1].id(), NodeId::from_raw(2));
        assert_eq!(sum.children()[1].prefix().whitespace, " ");
    }
}
