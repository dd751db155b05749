use arbor_errors::{ContractViolation, Result};
use arbor_tree::{Language, Node, Role, Tree};

use crate::queue::SendQueue;
use crate::{Atom, CodecRegistry, Item, Transmit, Value, binding};

/// Encodes a tree against a baseline into a queue of items.
///
/// Walks both trees in lockstep. Wherever the new tree holds the same value as
/// the baseline, a single `NoChange` stands for the whole value, subtree
/// included.
pub struct Sender<'a> {
    queue: SendQueue,
    registry: &'a CodecRegistry,
    language: Language,
}

impl<'a> Sender<'a> {
    pub(crate) fn new(registry: &'a CodecRegistry, language: Language) -> Self {
        Self { queue: SendQueue::default(), registry, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    pub fn push(&mut self, item: Item) {
        self.queue.push(item);
    }

    pub fn value(&mut self, value: Value) {
        self.push(Item::Value(value));
    }

    pub fn atom<A: Atom>(&mut self, atom: &A) {
        self.value(atom.to_value());
    }

    /// Sends `after` relative to `before`, the value at the same position in
    /// the baseline.
    pub fn field<T: Transmit>(&mut self, after: &T, before: Option<&T>) -> Result<()> {
        match before {
            Some(before) if after.unchanged(before) => {
                self.push(Item::NoChange);
                Ok(())
            }
            Some(before) => {
                self.push(Item::Change);
                after.send(Some(before), self)
            }
            None => {
                self.push(Item::Add);
                after.send(None, self)
            }
        }
    }

    /// Like `field`, for a value that may be absent. `before` is `None` when
    /// there is no baseline at all and `Some(None)` when the baseline value was
    /// absent.
    pub fn optional<T: Transmit>(
        &mut self,
        after: Option<&T>,
        before: Option<Option<&T>>,
    ) -> Result<()> {
        match (after, before) {
            (None, Some(None)) => {
                self.push(Item::NoChange);
                Ok(())
            }
            (None, _) => {
                self.push(Item::Null);
                Ok(())
            }
            (Some(after), Some(Some(before))) => self.field(after, Some(before)),
            (Some(after), _) => self.field(after, None),
        }
    }

    /// Id, prefix and markers: the fields every node starts with.
    pub fn header<N: Node>(&mut self, node: &N, before: Option<&N>) -> Result<()> {
        self.push(Item::Id(node.id()));
        self.field(node.prefix(), before.map(N::prefix))?;
        self.field(node.markers(), before.map(N::markers))
    }

    /// Emits a node discriminant and hands the body to the round's binding.
    ///
    /// A baseline of a different kind cannot be diffed against, so it is dropped.
    pub(crate) fn node(&mut self, after: &Tree, before: Option<&Tree>) -> Result<()> {
        let before = before.filter(|before| before.kind() == after.kind());
        self.push(Item::Node(after.kind()));
        binding::send(after, before, self)
    }

    fn finish(self) -> Vec<Item> {
        self.queue.finish()
    }
}

/// Encodes `root` as one round.
///
/// With no usable baseline the whole tree is sent. A baseline declared in a
/// different language than `root` is not usable.
pub fn send(root: &Tree, baseline: Option<&Tree>, registry: &CodecRegistry) -> Result<Vec<Item>> {
    let language = root.language().ok_or_else(|| ContractViolation::Role {
        node: root.id(),
        actual: root.kind(),
        expected: Role::SourceFile,
        field: "root".to_owned(),
    })?;
    let baseline = baseline.filter(|baseline| baseline.language() == Some(language));

    let mut s = Sender::new(registry, language);
    s.push(Item::Begin(language));
    s.field(root, baseline)?;
    s.push(Item::End);
    Ok(s.finish())
}
