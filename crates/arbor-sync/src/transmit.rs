//! How each field type is compared against its baseline and put on the wire.

use std::sync::Arc;

use arbor_errors::{ContractViolation, Desync, Result};
use arbor_tree::nodes::{BinaryOperator, ComprehensionKind, LiteralValue, UnaryOperator};
use arbor_tree::{Container, LeftPadded, Marker, Markers, NodeId, RightPadded, Space, Tree};

use crate::{Item, Receiver, Sender, Value, list};

/// A field value that can be sent relative to a baseline value.
///
/// `send` and `receive` see the baseline value at the same structural
/// position, if there is one, and must read exactly what the other wrote.
pub trait Transmit: Clone {
    /// Whether `self` may be replaced on the wire by a `NoChange`.
    fn unchanged(&self, before: &Self) -> bool;

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()>;

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self>;
}

/// Identity of a list element, used to match it against the baseline list.
pub trait Keyed {
    fn key(&self) -> NodeId;
}

/// A value carried by a single `Value` item.
pub trait Atom: Sized {
    const NAME: &'static str;

    fn to_value(&self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl Atom for String {
    const NAME: &'static str = "string";

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Atom for bool {
    const NAME: &'static str = "boolean";

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl Atom for usize {
    const NAME: &'static str = "count";

    fn to_value(&self) -> Value {
        Value::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(value) => Self::try_from(*value).ok(),
            _ => None,
        }
    }
}

impl Atom for Option<String> {
    const NAME: &'static str = "optional string";

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, |value| Value::Str(value.clone()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            Value::Str(value) => Some(Some(value.clone())),
            _ => None,
        }
    }
}

impl Atom for LiteralValue {
    const NAME: &'static str = "literal";

    fn to_value(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Int(value) => Value::Int(*value),
            Self::Float(value) => Value::Float(*value),
            Self::Str(value) => Value::Str(value.clone()),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::None,
            Value::Bool(value) => Self::Bool(*value),
            Value::Int(value) => Self::Int(*value),
            Value::Float(value) => Self::Float(*value),
            Value::Str(value) => Self::Str(value.clone()),
        })
    }
}

macro_rules! named_atom {
    ($($ty:ident),*) => {
        $(
            impl Atom for $ty {
                const NAME: &'static str = stringify!($ty);

                fn to_value(&self) -> Value {
                    Value::Str(self.name().to_owned())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Str(name) => Self::from_name(name),
                        _ => None,
                    }
                }
            }
        )*
    };
}

named_atom!(BinaryOperator, UnaryOperator, ComprehensionKind);

macro_rules! transmit_atom {
    ($($ty:ty),*) => {
        $(
            impl Transmit for $ty {
                fn unchanged(&self, before: &Self) -> bool {
                    self == before
                }

                fn send(&self, _before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
                    s.atom(self);
                    Ok(())
                }

                fn receive(_before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
                    r.atom()
                }
            }
        )*
    };
}

transmit_atom!(String, bool, LiteralValue, BinaryOperator, UnaryOperator, ComprehensionKind);

impl Transmit for Tree {
    fn unchanged(&self, before: &Self) -> bool {
        self.same(before)
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        s.node(self, before)
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        r.node(before)
    }
}

impl Keyed for Tree {
    fn key(&self) -> NodeId {
        self.id()
    }
}

/// Spaces go through the codec of the round's language.
impl Transmit for Space {
    fn unchanged(&self, before: &Self) -> bool {
        self == before
    }

    fn send(&self, _before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        let codec = s.registry().space(s.language())?;
        (codec.encode)(self, s)
    }

    fn receive(_before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        let codec = r.registry().space(r.language())?;
        (codec.decode)(r)
    }
}

impl Transmit for Arc<dyn Marker> {
    fn unchanged(&self, before: &Self) -> bool {
        Arc::ptr_eq(self, before) || self.dyn_eq(before.as_ref())
    }

    fn send(&self, _before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        let kind = self.kind();
        let codec = s.registry().marker(kind, s.language())?;
        s.push(Item::Marker(kind.name().to_owned()));
        (codec.encode)(self.as_ref(), s)
    }

    fn receive(_before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        let name = match r.pop()? {
            Item::Marker(name) => name,
            item => return Err(item.unexpected("marker")),
        };
        let language = r.language();
        let kind = r
            .registry()
            .marker_kind(&name)
            .ok_or(Desync::UnknownMarker { kind: name, language })?;
        let codec = r.registry().marker(kind, language)?;
        let marker = (codec.decode)(r)?;
        if marker.kind() != kind {
            let marker = marker.kind();
            return Err(ContractViolation::Marker { marker, expected: kind.name() }.into());
        }
        Ok(marker)
    }
}

impl Keyed for Arc<dyn Marker> {
    fn key(&self) -> NodeId {
        self.id()
    }
}

impl Transmit for Markers {
    fn unchanged(&self, before: &Self) -> bool {
        self == before
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        list::send(self.entries(), before.map(Markers::entries), s)
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        list::receive(before.map(Markers::entries), r).map(Self::new)
    }
}

impl<T: Transmit + Keyed> Transmit for Vec<T> {
    fn unchanged(&self, before: &Self) -> bool {
        self.len() == before.len() && self.iter().zip(before).all(|(a, b)| a.unchanged(b))
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        list::send(self, before.map(Vec::as_slice), s)
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        list::receive(before.map(Vec::as_slice), r)
    }
}

impl<T: Transmit> Transmit for RightPadded<T> {
    fn unchanged(&self, before: &Self) -> bool {
        self.element.unchanged(&before.element)
            && self.after == before.after
            && self.markers == before.markers
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        s.field(&self.element, before.map(|b| &b.element))?;
        s.field(&self.after, before.map(|b| &b.after))?;
        s.field(&self.markers, before.map(|b| &b.markers))
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        Ok(Self {
            element: r.field(before.map(|b| &b.element))?,
            after: r.field(before.map(|b| &b.after))?,
            markers: r.field(before.map(|b| &b.markers))?,
        })
    }
}

impl<T: Keyed> Keyed for RightPadded<T> {
    fn key(&self) -> NodeId {
        self.element.key()
    }
}

impl<T: Transmit> Transmit for LeftPadded<T> {
    fn unchanged(&self, before: &Self) -> bool {
        self.before == before.before
            && self.element.unchanged(&before.element)
            && self.markers == before.markers
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        s.field(&self.before, before.map(|b| &b.before))?;
        s.field(&self.element, before.map(|b| &b.element))?;
        s.field(&self.markers, before.map(|b| &b.markers))
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        Ok(Self {
            before: r.field(before.map(|b| &b.before))?,
            element: r.field(before.map(|b| &b.element))?,
            markers: r.field(before.map(|b| &b.markers))?,
        })
    }
}

impl<T: Transmit + Keyed> Transmit for Container<T> {
    fn unchanged(&self, before: &Self) -> bool {
        self.before == before.before
            && self.elements.unchanged(&before.elements)
            && self.markers == before.markers
    }

    fn send(&self, before: Option<&Self>, s: &mut Sender<'_>) -> Result<()> {
        s.field(&self.before, before.map(|b| &b.before))?;
        s.field(&self.elements, before.map(|b| &b.elements))?;
        s.field(&self.markers, before.map(|b| &b.markers))
    }

    fn receive(before: Option<&Self>, r: &mut Receiver<'_>) -> Result<Self> {
        Ok(Self {
            before: r.field(before.map(|b| &b.before))?,
            elements: r.field(before.map(|b| &b.elements))?,
            markers: r.field(before.map(|b| &b.markers))?,
        })
    }
}
