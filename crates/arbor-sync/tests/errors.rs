use std::sync::Arc;

use arbor_errors::{ContractViolation, Desync, ErrorKind, SyncError};
use arbor_sync::{CodecRegistry, Item, ReceiveSession, SendSession, Value, receive, send};
use arbor_tree::nodes::{BinaryOperator, Empty};
use arbor_tree::{Language, Markers, NodeId, NodeKind, Role, Semicolon, Space, Tree, TreeBuilder};

fn sum_statement() -> Tree {
    let mut b = TreeBuilder::new();
    let one = b.int(1);
    let two = b.int(2);
    let sum = b.binary(one, BinaryOperator::Addition, two);
    let stmt = b.expression_statement(sum);
    b.compilation_unit(Language::Python, "sum.py", vec![stmt])
}

fn edited(before: &Tree, value: i64) -> Tree {
    let id = NodeId::from_raw(2);
    let literal = TreeBuilder::int_with_id(id, value).with_prefix(Space::format(" "));
    before.replace(id, &literal)
}

#[test]
fn truncated_stream() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    items.truncate(items.len() / 2);

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::Truncated));
    assert_eq!(error.kind(), ErrorKind::ProtocolDesync);
}

#[test]
fn items_after_the_end() {
    let registry = CodecRegistry::standard().unwrap();
    let tree = sum_statement();
    let mut items = send(&tree, Some(&tree), &registry).unwrap();
    items.push(Item::NoChange);

    let error = receive(Some(&tree), items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::TrailingItems));
}

#[test]
fn list_operation_on_an_unknown_id() {
    let registry = CodecRegistry::standard().unwrap();
    let before = sum_statement();
    let mut items = send(&edited(&before, 3), Some(&before), &registry).unwrap();
    for item in &mut items {
        if *item == Item::ListUpdate(NodeId::from_raw(4)) {
            *item = Item::ListUpdate(NodeId::from_raw(99));
        }
    }

    let error = receive(Some(&before), items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::UnknownListKey(NodeId::from_raw(99))));
}

fn replace(items: &mut [Item], from: &Item, to: Item) {
    let slot = items.iter_mut().find(|item| *item == from).unwrap();
    *slot = to;
}

#[test]
fn list_longer_than_its_operations() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    replace(&mut items, &Item::ListHeader { len: 1 }, Item::ListHeader { len: u32::MAX });

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ListShape { expected: u32::MAX }));
}

#[test]
fn list_with_an_unfilled_slot() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    replace(&mut items, &Item::ListHeader { len: 1 }, Item::ListHeader { len: 2 });

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ListShape { expected: 2 }));
}

#[test]
fn insert_past_the_end_of_the_list() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    replace(&mut items, &Item::ListInsert { position: 0 }, Item::ListInsert { position: 5 });

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ListPosition { position: 5 }));
}

/// The differential round that updates statement #4 in place, and the index
/// of the `end-list` closing the statements.
fn update_round(registry: &CodecRegistry) -> (Tree, Vec<Item>, usize) {
    let before = sum_statement();
    let items = send(&edited(&before, 3), Some(&before), registry).unwrap();
    let end = items.iter().position(|item| *item == Item::ListEnd).unwrap();
    (before, items, end)
}

#[test]
fn updated_element_removed_afterwards() {
    let registry = CodecRegistry::standard().unwrap();
    let (before, mut items, end) = update_round(&registry);
    items.insert(end, Item::ListRemove(NodeId::from_raw(4)));
    replace(&mut items, &Item::ListHeader { len: 1 }, Item::ListHeader { len: 0 });

    let error = receive(Some(&before), items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ConflictingListOps(NodeId::from_raw(4))));
}

#[test]
fn updated_element_moved_afterwards() {
    let registry = CodecRegistry::standard().unwrap();
    let (before, mut items, end) = update_round(&registry);
    items.insert(end, Item::ListMove { id: NodeId::from_raw(4), position: 0 });

    let error = receive(Some(&before), items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ConflictingListOps(NodeId::from_raw(4))));
}

#[test]
fn element_updated_twice() {
    let registry = CodecRegistry::standard().unwrap();
    let (before, mut items, end) = update_round(&registry);
    let update = Item::ListUpdate(NodeId::from_raw(4));
    let start = items.iter().position(|item| *item == update).unwrap();
    let segment: Vec<Item> = items[start..end].to_vec();
    items.splice(end..end, segment);

    let error = receive(Some(&before), items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::ConflictingListOps(NodeId::from_raw(4))));
}

#[test]
fn unregistered_marker() {
    let registry = CodecRegistry::standard().unwrap();
    let empty: Tree = Empty {
        id: NodeId::from_raw(1),
        prefix: Space::EMPTY,
        markers: Markers::EMPTY.add(Semicolon { id: NodeId::from_raw(9) }),
    }
    .into();
    let unit = TreeBuilder::starting_at(2).compilation_unit(Language::Java, "A.java", vec![empty]);
    let mut items = send(&unit, None, &registry).unwrap();
    replace(&mut items, &Item::Marker("semicolon".to_owned()), Item::Marker("bookmark".to_owned()));

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(
        error,
        SyncError::Desync(Desync::UnknownMarker {
            kind: "bookmark".to_owned(),
            language: Language::Java,
        })
    );
}

#[test]
fn unknown_operator_name() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    let addition = Item::Value(Value::Str(BinaryOperator::Addition.name().to_owned()));
    replace(&mut items, &addition, Item::Value(Value::Str("Sideways".to_owned())));

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(
        error,
        SyncError::Desync(Desync::InvalidValue {
            expected: "BinaryOperator",
            value: "\"Sideways\"".to_owned(),
        })
    );
    assert_eq!(error.to_string(), r#"protocol desync: `"Sideways"` is not a valid BinaryOperator"#);
}

#[test]
fn compilation_unit_below_the_root() {
    let registry = CodecRegistry::standard().unwrap();
    let inner = TreeBuilder::new().compilation_unit(Language::Java, "B.java", vec![]);
    let outer = TreeBuilder::starting_at(2).compilation_unit(Language::Java, "A.java", vec![inner]);

    let items = send(&outer, None, &registry).unwrap();
    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(
        error,
        SyncError::Contract(ContractViolation::Role {
            node: NodeId::from_raw(1),
            actual: NodeKind::CompilationUnit,
            expected: Role::Statement,
            field: "CompilationUnit.statements".to_owned(),
        })
    );
}

#[test]
fn stream_must_open_with_begin() {
    let registry = CodecRegistry::standard().unwrap();
    let error = receive(None, vec![Item::NoChange, Item::End], &registry).unwrap_err();
    assert_eq!(error.to_string(), "protocol desync: expected begin, found `no-change`");
}

#[test]
fn differential_round_without_a_baseline() {
    let registry = CodecRegistry::standard().unwrap();
    let before = sum_statement();
    let items = send(&edited(&before, 3), Some(&before), &registry).unwrap();

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error, SyncError::Desync(Desync::MissingBaseline("change")));
}

#[test]
fn python_node_in_a_java_round() {
    let registry = CodecRegistry::standard().unwrap();
    let mut items = send(&sum_statement(), None, &registry).unwrap();
    items[0] = Item::Begin(Language::Java);

    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(
        error,
        SyncError::Desync(Desync::UnknownKind {
            kind: NodeKind::ExpressionStatement,
            language: Language::Java,
        })
    );
}

#[test]
fn python_node_in_a_java_tree() {
    let registry = CodecRegistry::standard().unwrap();
    let mut b = TreeBuilder::new();
    let name = b.identifier("x");
    let stmt = b.expression_statement(name);
    let unit = b.compilation_unit(Language::Java, "A.java", vec![stmt]);

    let error = send(&unit, None, &registry).unwrap_err();
    assert_eq!(
        error,
        SyncError::Contract(ContractViolation::Foreign {
            node: NodeId::from_raw(2),
            kind: NodeKind::ExpressionStatement,
            language: Language::Java,
        })
    );
}

#[test]
fn statement_in_an_expression_slot() {
    let registry = CodecRegistry::standard().unwrap();
    let mut b = TreeBuilder::new();
    let key = b.identifier("k");
    let key = b.expression_statement(key);
    let value = b.int(1);
    let entry = b.key_value(key, value);
    let entry = b.expression_statement(entry);
    let unit = b.compilation_unit(Language::Python, "kv.py", vec![entry]);

    let items = send(&unit, None, &registry).unwrap();
    let error = receive(None, items, &registry).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeContract);
    assert_eq!(
        error,
        SyncError::Contract(ContractViolation::Role {
            node: NodeId::from_raw(2),
            actual: NodeKind::ExpressionStatement,
            expected: Role::Expression,
            field: "KeyValue.key".to_owned(),
        })
    );
}

#[test]
fn root_must_be_a_source_file() {
    let registry = CodecRegistry::standard().unwrap();
    let literal = TreeBuilder::new().int(1);

    let error = send(&literal, None, &registry).unwrap_err();
    assert_eq!(
        error.to_string(),
        "type contract violated: #1 is a Literal, but `root` requires SourceFile"
    );
}

#[test]
fn failed_round_clears_the_receiving_baseline() {
    let registry = Arc::new(CodecRegistry::standard().unwrap());
    let mut sender = SendSession::new(registry.clone());
    let mut receiver = ReceiveSession::new(registry);

    let first = sum_statement();
    receiver.receive(sender.send(&first).unwrap()).unwrap();
    assert!(receiver.baseline().is_some_and(|tree| *tree == first));

    let second = edited(&first, 3);
    let mut items = sender.send(&second).unwrap();
    items.pop();
    assert!(receiver.receive(items).is_err());
    assert!(receiver.baseline().is_none());

    // The sender still diffs against `second`, which the receiver never got.
    let third = edited(&second, 4);
    let error = receiver.receive(sender.send(&third).unwrap()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ProtocolDesync);

    sender.reset();
    let received = receiver.receive(sender.send(&third).unwrap()).unwrap();
    assert_eq!(received, third);
    assert_eq!(receiver.rounds(), 2);
    assert_eq!(sender.rounds(), 4);
}

#[test]
fn failed_send_clears_the_sending_baseline() {
    let registry = Arc::new(CodecRegistry::standard().unwrap());
    let mut sender = SendSession::new(registry);
    let first = sum_statement();
    sender.send(&first).unwrap();

    assert!(sender.send(&TreeBuilder::new().int(1)).is_err());
    assert!(sender.baseline().is_none());

    let items = sender.send(&first).unwrap();
    assert_eq!(items[1], Item::Add);
}
