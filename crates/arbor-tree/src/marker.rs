use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{NodeId, Space};

/// Open metadata attached to a node or a padding boundary.
///
/// New kinds are added by implementing this trait and registering a codec for
/// every language; nodes never change to accommodate them.
pub trait Marker: Any + fmt::Debug + Send + Sync {
    fn id(&self) -> NodeId;

    fn kind(&self) -> MarkerKind;

    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn Marker) -> bool;
}

/// Wire discriminant of a marker type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKind(&'static str);

impl MarkerKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

macro_rules! marker {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            pub const KIND: MarkerKind = MarkerKind::new($kind);
        }

        impl Marker for $ty {
            fn id(&self) -> NodeId {
                self.id
            }

            fn kind(&self) -> MarkerKind {
                Self::KIND
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn dyn_eq(&self, other: &dyn Marker) -> bool {
                other.as_any().downcast_ref::<Self>() == Some(self)
            }
        }
    };
}

/// A comma after the last element of a container, with the space that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailingComma {
    pub id: NodeId,
    pub suffix: Space,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Semicolon {
    pub id: NodeId,
}

/// Left behind by a search so later passes can find what matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub id: NodeId,
    pub description: Option<String>,
}

marker!(TrailingComma, "trailing-comma");
marker!(Semicolon, "semicolon");
marker!(SearchResult, "search-result");

#[derive(Clone, Default)]
pub struct Markers {
    entries: Vec<Arc<dyn Marker>>,
}

impl Markers {
    pub const EMPTY: Self = Self { entries: Vec::new() };

    pub fn new(entries: Vec<Arc<dyn Marker>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Arc<dyn Marker>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Arc<dyn Marker>> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find<M: Marker>(&self) -> Option<&M> {
        self.entries.iter().find_map(|marker| marker.as_any().downcast_ref::<M>())
    }

    pub fn add(mut self, marker: impl Marker) -> Self {
        self.entries.push(Arc::new(marker));
        self
    }
}

impl PartialEq for Markers {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(a, b)| a.dyn_eq(b.as_ref()))
    }
}

impl Eq for Markers {}

impl fmt::Debug for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}
