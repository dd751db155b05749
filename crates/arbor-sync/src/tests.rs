use arbor_tree::nodes::{BinaryOperator, Empty};
use arbor_tree::{Language, Markers, NodeId, Semicolon, Space, Tree, TreeBuilder};
use expect_test::expect;

use crate::{CodecRegistry, debug_items, receive, send};

fn sum_statement() -> Tree {
    let mut b = TreeBuilder::new();
    let one = b.int(1);
    let two = b.int(2);
    let sum = b.binary(one, BinaryOperator::Addition, two);
    let stmt = b.expression_statement(sum);
    b.compilation_unit(Language::Python, "sum.py", vec![stmt])
}

#[test]
fn full_round_shape() {
    let registry = CodecRegistry::standard().unwrap();
    let empty: Tree = Empty {
        id: NodeId::from_raw(1),
        prefix: Space::EMPTY,
        markers: Markers::EMPTY.add(Semicolon { id: NodeId::from_raw(9) }),
    }
    .into();
    let unit = TreeBuilder::starting_at(2).compilation_unit(Language::Java, "A.java", vec![empty]);

    let items = send(&unit, None, &registry).unwrap();
    expect![[r#"
        begin java
        add
        node CompilationUnit
        id #2
        add
        value ""
        value 0
        add
        list len=0
        end-list
        add
        value "A.java"
        add
        list len=1
        insert @0
        add
        node Empty
        id #1
        add
        value ""
        value 0
        add
        list len=1
        insert @0
        marker semicolon
        id #9
        end-list
        add
        value ""
        value 0
        add
        list len=0
        end-list
        end-list
        add
        value "\n"
        value 0
        end
    "#]]
    .assert_eq(&debug_items(&items));

    assert_eq!(receive(None, items, &registry).unwrap(), unit);
}

#[test]
fn leaf_edit_touches_only_its_path() {
    let registry = CodecRegistry::standard().unwrap();
    let before = sum_statement();
    let two = NodeId::from_raw(2);
    let three = TreeBuilder::int_with_id(two, 3).with_prefix(Space::format(" "));
    let after = before.replace(two, &three);

    let items = send(&after, Some(&before), &registry).unwrap();
    expect![[r#"
        begin python
        change
        node CompilationUnit
        id #5
        no-change
        no-change
        no-change
        change
        list len=1
        update #4
        change
        node ExpressionStatement
        id #4
        change
        node Binary
        id #3
        no-change
        no-change
        no-change
        no-change
        change
        node Literal
        id #2
        no-change
        no-change
        change
        value 3
        change
        value "3"
        no-change
        no-change
        end-list
        no-change
        end
    "#]]
    .assert_eq(&debug_items(&items));
}

#[test]
fn untouched_tree_is_one_item() {
    let registry = CodecRegistry::standard().unwrap();
    let unit = sum_statement();

    let items = send(&unit, Some(&unit), &registry).unwrap();
    expect![[r#"
        begin python
        no-change
        end
    "#]]
    .assert_eq(&debug_items(&items));
}

#[test]
fn baseline_in_another_language_is_ignored() {
    let registry = CodecRegistry::standard().unwrap();
    let python = sum_statement();
    let java = TreeBuilder::starting_at(100).compilation_unit(Language::Java, "A.java", vec![]);

    let items = send(&python, Some(&java), &registry).unwrap();
    assert_eq!(items[1].to_string(), "add");
    assert_eq!(receive(Some(&java), items, &registry).unwrap(), python);
}
