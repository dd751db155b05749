//! Node bodies and generic-construct codecs, one module per language.
//!
//! `shared` encodes the core node set. Each language module handles the
//! variants it adds and forwards everything else to `shared`; a variant the
//! language does not know is rejected on both sides.

use arbor_errors::Result;
use arbor_tree::{Language, NodeKind, Tree};

use crate::{Receiver, Sender};

/// The baseline payload of a given variant, if the baseline is that variant.
macro_rules! baseline {
    ($before:expr, $variant:path) => {
        match $before {
            Some($variant(node)) => Some(&**node),
            _ => None,
        }
    };
}

/// Sends each named field of `$node` against the same field of `$before`.
macro_rules! send_fields {
    ($s:expr, $node:expr, $before:expr; $($field:ident),+ $(,)?) => {
        $( $s.field(&$node.$field, $before.map(|b| &b.$field))?; )+
    };
}

/// Receives one field against the same field of `$before`.
macro_rules! field {
    ($r:expr, $before:expr, $field:ident) => {
        $r.field($before.map(|b| &b.$field))?
    };
}

pub(crate) mod java;
pub(crate) mod python;
pub(crate) mod shared;

pub(crate) fn send(tree: &Tree, before: Option<&Tree>, s: &mut Sender<'_>) -> Result<()> {
    match s.language() {
        Language::Java => java::send(tree, before, s),
        Language::Python => python::send(tree, before, s),
    }
}

pub(crate) fn receive(kind: NodeKind, before: Option<&Tree>, r: &mut Receiver<'_>) -> Result<Tree> {
    match r.language() {
        Language::Java => java::receive(kind, before, r),
        Language::Python => python::receive(kind, before, r),
    }
}
