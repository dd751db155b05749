use arbor_errors::{ContractViolation, Desync, Result};
use arbor_tree::{Language, Markers, Node, NodeId, Role, Space, Tree};

use crate::queue::ReceiveQueue;
use crate::{Atom, CodecRegistry, Item, Transmit, binding};

/// Rebuilds a tree from a queue of items and the baseline it was encoded against.
///
/// Every `NoChange` hands back the baseline value itself, so unchanged
/// subtrees of the result are the baseline's subtrees.
pub struct Receiver<'a> {
    queue: ReceiveQueue<'a>,
    registry: &'a CodecRegistry,
    language: Language,
}

impl<'a> Receiver<'a> {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn registry(&self) -> &'a CodecRegistry {
        self.registry
    }

    pub fn pop(&mut self) -> Result<Item> {
        self.queue.pop()
    }

    pub fn id(&mut self) -> Result<NodeId> {
        match self.pop()? {
            Item::Id(id) => Ok(id),
            item => Err(item.unexpected("id")),
        }
    }

    pub fn atom<A: Atom>(&mut self) -> Result<A> {
        let value = match self.pop()? {
            Item::Value(value) => value,
            item => return Err(item.unexpected("value")),
        };
        A::from_value(&value).ok_or_else(|| {
            Desync::InvalidValue { expected: A::NAME, value: value.to_string() }.into()
        })
    }

    /// Reads the value `Sender::field` wrote for the same position.
    pub fn field<T: Transmit>(&mut self, before: Option<&T>) -> Result<T> {
        match self.pop()? {
            Item::NoChange => {
                before.cloned().ok_or_else(|| Desync::MissingBaseline("no-change").into())
            }
            Item::Change => {
                let before = before.ok_or(Desync::MissingBaseline("change"))?;
                T::receive(Some(before), self)
            }
            Item::Add => T::receive(None, self),
            item => Err(item.unexpected("no-change, change or add")),
        }
    }

    /// Reads the value `Sender::optional` wrote for the same position.
    pub fn optional<T: Transmit>(&mut self, before: Option<Option<&T>>) -> Result<Option<T>> {
        match self.pop()? {
            Item::Null => Ok(None),
            Item::NoChange => match before {
                Some(before) => Ok(before.cloned()),
                None => Err(Desync::MissingBaseline("no-change").into()),
            },
            Item::Change => match before {
                Some(Some(before)) => T::receive(Some(before), self).map(Some),
                _ => Err(Desync::MissingBaseline("change").into()),
            },
            Item::Add => T::receive(None, self).map(Some),
            item => Err(item.unexpected("null, no-change, change or add")),
        }
    }

    pub fn header<N: Node>(&mut self, before: Option<&N>) -> Result<(NodeId, Space, Markers)> {
        let id = self.id()?;
        let prefix = self.field(before.map(N::prefix))?;
        let markers = self.field(before.map(N::markers))?;
        Ok((id, prefix, markers))
    }

    /// Reads a node discriminant, lets the round's binding decode the body and
    /// checks every child against the role its field requires.
    pub(crate) fn node(&mut self, before: Option<&Tree>) -> Result<Tree> {
        let kind = match self.pop()? {
            Item::Node(kind) => kind,
            item => return Err(item.unexpected("node")),
        };
        let before = before.filter(|before| before.kind() == kind);
        let tree = binding::receive(kind, before, self)?;

        for slot in tree.slots() {
            expect_role(slot.tree, slot.role, || format!("{}.{}", tree.kind(), slot.field))?;
        }
        Ok(tree)
    }
}

fn expect_role(tree: &Tree, role: Role, field: impl FnOnce() -> String) -> Result<()> {
    if tree.roles().contains(role) {
        return Ok(());
    }
    let (node, actual) = (tree.id(), tree.kind());
    Err(ContractViolation::Role { node, actual, expected: role, field: field() }.into())
}

/// Decodes one round.
///
/// The baseline is only consulted if it is declared in the round's language.
/// On any error nothing is returned; the caller must drop its baseline and
/// ask for a full round.
pub fn receive<'a>(
    baseline: Option<&Tree>,
    items: impl IntoIterator<Item = Item> + 'a,
    registry: &'a CodecRegistry,
) -> Result<Tree> {
    let mut queue = ReceiveQueue::new(items);
    let language = match queue.pop()? {
        Item::Begin(language) => language,
        item => return Err(item.unexpected("begin")),
    };
    let baseline = baseline.filter(|baseline| baseline.language() == Some(language));

    let mut r = Receiver { queue, registry, language };
    let root: Tree = r.field(baseline)?;
    expect_role(&root, Role::SourceFile, || "root".to_owned())?;

    match r.pop()? {
        Item::End => {}
        item => return Err(item.unexpected("end")),
    }
    if !r.queue.is_exhausted() {
        return Err(Desync::TrailingItems.into());
    }
    Ok(root)
}
