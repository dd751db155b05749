use arbor_sync::{CodecRegistry, Item, RoundStats, receive, send};
use arbor_tree::nodes::{BinaryOperator, ComprehensionKind, UnaryOperator};
use arbor_tree::{Language, NodeId, PyComment, Space, TextComment, Tree, TreeBuilder};

fn java_program() -> Tree {
    let mut b = TreeBuilder::new();
    let x = b.identifier("x");
    let one = b.int(1);
    let negated = b.unary(UnaryOperator::Negative, one);
    let parens = b.parentheses(negated);
    let assign = b.assignment(x, parens);
    let comment = TextComment { text: "// sign".into(), multiline: false, suffix: "\n".into() };
    let assign = assign.with_prefix(Space::new("", vec![comment.into()]));

    let x = b.identifier("x");
    let zero = b.int(0);
    let condition = b.binary(x, BinaryOperator::GreaterThan, zero);
    let out = b.identifier("out");
    let text = b.string("big");
    let call = b.method_invocation(Some(out), "println", vec![text]);
    let then_part = b.block(vec![call]);
    let ret = b.return_(None);
    let else_part = b.block(vec![ret]);
    let if_ = b.if_(condition, then_part, Some(else_part));

    b.compilation_unit(Language::Java, "Main.java", vec![assign, if_])
}

fn python_program() -> Tree {
    let mut b = TreeBuilder::new();
    let k = b.string("k");
    let one = b.int(1);
    let first = b.key_value(k, one);

    let result = b.identifier("x");
    let variable = b.identifier("x");
    let xs = b.identifier("xs");
    let x = b.identifier("x");
    let condition = b.comprehension_condition(x);
    let clause = b.comprehension_clause(variable, xs, vec![condition]);
    let comprehension = b.comprehension(ComprehensionKind::List, result, vec![clause]);
    let j = b.string("j");
    let second = b.key_value(j, comprehension);

    let dict = b.dict(vec![first, second]);
    let dict = b.expression_statement(dict);
    let comment = PyComment { text: "# table".into(), suffix: "\n".into(), aligned_to_indent: true };
    let dict = dict.with_prefix(Space::new("", vec![comment.into()]));

    let y = b.identifier("y");
    let two = b.int(2);
    let assign = b.assignment(y, two);
    let walrus = b.statement_expression(assign);
    let walrus = b.expression_statement(walrus);

    b.compilation_unit(Language::Python, "d.py", vec![dict, walrus])
}

fn sum_statements() -> Tree {
    let mut b = TreeBuilder::new();
    let one = b.int(1);
    let two = b.int(2);
    let sum = b.binary(one, BinaryOperator::Addition, two);
    let first = b.expression_statement(sum);
    let other = b.identifier("other");
    let second = b.expression_statement(other);
    b.compilation_unit(Language::Python, "sum.py", vec![first, second])
}

#[test]
fn initial_round_reconstructs_the_tree() {
    let registry = CodecRegistry::standard().unwrap();
    for tree in [java_program(), python_program(), sum_statements()] {
        let items = send(&tree, None, &registry).unwrap();
        assert!(!items.contains(&Item::NoChange));
        assert_eq!(RoundStats::of(&items).nodes, tree.count());

        let received = receive(None, items, &registry).unwrap();
        assert_eq!(received, tree);
        assert!(!received.same(&tree));
    }
}

#[test]
fn unchanged_tree_comes_back_by_identity() {
    let registry = CodecRegistry::standard().unwrap();
    for tree in [java_program(), python_program()] {
        let items = send(&tree, Some(&tree), &registry).unwrap();
        let language = tree.language().unwrap();
        assert_eq!(items, [Item::Begin(language), Item::NoChange, Item::End]);
        assert!(RoundStats::of(&items).is_idempotent());

        let received = receive(Some(&tree), items, &registry).unwrap();
        assert!(received.same(&tree));
    }
}

#[test]
fn leaf_edit_shares_everything_off_its_path() {
    let registry = CodecRegistry::standard().unwrap();
    let before = sum_statements();
    let two = NodeId::from_raw(2);
    let three = TreeBuilder::int_with_id(two, 3).with_prefix(Space::format(" "));
    let after = before.replace(two, &three);

    let full = send(&after, None, &registry).unwrap();
    let items = send(&after, Some(&before), &registry).unwrap();
    let stats = RoundStats::of(&items);
    assert!(items.len() < full.len());
    // CompilationUnit, ExpressionStatement, Binary, Literal
    assert_eq!(stats.nodes, 4);

    let received = receive(Some(&before), items, &registry).unwrap();
    assert_eq!(received, after);

    let left = NodeId::from_raw(1);
    let shared = received.find(left).zip(before.find(left));
    assert!(shared.is_some_and(|(a, b)| a.same(b)));

    let other = NodeId::from_raw(6);
    let shared = received.find(other).zip(before.find(other));
    assert!(shared.is_some_and(|(a, b)| a.same(b)));
}

#[test]
fn successive_rounds_chain() {
    let registry = CodecRegistry::standard().unwrap();
    let mut sent = sum_statements();
    let mut received = receive(None, send(&sent, None, &registry).unwrap(), &registry).unwrap();

    for value in 3..8 {
        let id = NodeId::from_raw(2);
        let literal = TreeBuilder::int_with_id(id, value).with_prefix(Space::format(" "));
        let next = sent.replace(id, &literal);
        let items = send(&next, Some(&sent), &registry).unwrap();
        received = receive(Some(&received), items, &registry).unwrap();
        assert_eq!(received, next);
        sent = next;
    }
}
