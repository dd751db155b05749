//! Keyed list reconciliation.
//!
//! Elements are matched against the baseline list by id. The sender emits
//! removals first, then walks the new list in order: new elements are
//! inserted at their position, elements outside the longest run of retained
//! elements that kept their relative order are moved, and retained elements
//! that changed in place are updated. Everything else is implied.

use arbor_errors::{Desync, Result};
use arbor_tree::NodeId;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use crate::{Item, Keyed, Receiver, Sender, Transmit};

type Baseline<'a, T> = IndexMap<NodeId, &'a T, FxBuildHasher>;

fn index<T: Keyed>(elements: &[T]) -> Result<Baseline<'_, T>> {
    let mut baseline = Baseline::with_capacity_and_hasher(elements.len(), FxBuildHasher);
    for element in elements {
        let key = element.key();
        if baseline.insert(key, element).is_some() {
            return Err(Desync::DuplicateListKey(key).into());
        }
    }
    Ok(baseline)
}

fn position(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|error| {
        Desync::InvalidValue { expected: "list position", value: error.to_string() }.into()
    })
}

/// Indices into `sequence` of one longest strictly increasing subsequence.
fn longest_increasing(sequence: &[usize]) -> Vec<usize> {
    // tails[k]: index of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous = vec![usize::MAX; sequence.len()];

    for (i, &value) in sequence.iter().enumerate() {
        let k = tails.partition_point(|&t| sequence[t] < value);
        if k > 0 {
            previous[i] = tails[k - 1];
        }
        if k == tails.len() {
            tails.push(i);
        } else {
            tails[k] = i;
        }
    }

    let mut run = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        run.push(i);
        cursor = (previous[i] != usize::MAX).then_some(previous[i]);
    }
    run.reverse();
    run
}

pub(crate) fn send<T: Transmit + Keyed>(
    after: &[T],
    before: Option<&[T]>,
    s: &mut Sender<'_>,
) -> Result<()> {
    let baseline = index(before.unwrap_or_default())?;
    s.push(Item::ListHeader { len: position(after.len())? });

    let mut kept = FxHashSet::with_capacity_and_hasher(after.len(), FxBuildHasher);
    for element in after {
        let key = element.key();
        if !kept.insert(key) {
            return Err(Desync::DuplicateListKey(key).into());
        }
    }

    let mut removed = 0;
    for &key in baseline.keys() {
        if !kept.contains(&key) {
            s.push(Item::ListRemove(key));
            removed += 1;
        }
    }

    // Positions in `after` of retained elements, and their baseline positions.
    let (retained, baseline_positions): (Vec<usize>, Vec<usize>) = after
        .iter()
        .enumerate()
        .filter_map(|(i, element)| Some((i, baseline.get_index_of(&element.key())?)))
        .unzip();
    let stable: FxHashSet<usize> =
        longest_increasing(&baseline_positions).into_iter().map(|k| retained[k]).collect();

    let (mut inserted, mut moved, mut updated) = (0, 0, 0);
    for (i, element) in after.iter().enumerate() {
        let key = element.key();
        match baseline.get(&key) {
            None => {
                s.push(Item::ListInsert { position: position(i)? });
                element.send(None, s)?;
                inserted += 1;
            }
            Some(&old) if stable.contains(&i) => {
                if !element.unchanged(old) {
                    s.push(Item::ListUpdate(key));
                    element.send(Some(old), s)?;
                    updated += 1;
                }
            }
            Some(&old) => {
                s.push(Item::ListMove { id: key, position: position(i)? });
                s.field(element, Some(old))?;
                moved += 1;
            }
        }
    }

    s.push(Item::ListEnd);
    tracing::trace!(len = after.len(), inserted, moved, updated, removed, "sent list");
    Ok(())
}

pub(crate) fn receive<T: Transmit + Keyed>(
    before: Option<&[T]>,
    r: &mut Receiver<'_>,
) -> Result<Vec<T>> {
    let len = match r.pop()? {
        Item::ListHeader { len } => len,
        item => return Err(item.unexpected("list header")),
    };
    let mut baseline = index(before.unwrap_or_default())?;
    // Nothing is sized from `len` until it is known to match what was read.
    let mut placed: FxHashMap<u32, T> = FxHashMap::default();
    let mut updates: FxHashMap<NodeId, T> = FxHashMap::default();

    let free = |placed: &FxHashMap<u32, T>, position: u32| -> Result<()> {
        if position >= len || placed.contains_key(&position) {
            return Err(Desync::ListPosition { position }.into());
        }
        Ok(())
    };
    let untouched = |updates: &FxHashMap<NodeId, T>, key: NodeId| -> Result<()> {
        if updates.contains_key(&key) {
            return Err(Desync::ConflictingListOps(key).into());
        }
        Ok(())
    };

    loop {
        match r.pop()? {
            Item::ListRemove(key) => {
                untouched(&updates, key)?;
                baseline.shift_remove(&key).ok_or(Desync::UnknownListKey(key))?;
            }
            Item::ListInsert { position } => {
                free(&placed, position)?;
                placed.insert(position, T::receive(None, r)?);
            }
            Item::ListMove { id, position } => {
                free(&placed, position)?;
                untouched(&updates, id)?;
                let old = baseline.shift_remove(&id).ok_or(Desync::UnknownListKey(id))?;
                placed.insert(position, r.field(Some(old))?);
            }
            Item::ListUpdate(key) => {
                untouched(&updates, key)?;
                let old = *baseline.get(&key).ok_or(Desync::UnknownListKey(key))?;
                updates.insert(key, T::receive(Some(old), r)?);
            }
            Item::ListEnd => break,
            item => return Err(item.unexpected("list operation")),
        }
    }

    if placed.len() + baseline.len() != len as usize {
        return Err(Desync::ListShape { expected: len }.into());
    }

    // Retained elements fill the remaining slots in their baseline order.
    let mut retained = baseline.into_iter().map(|(key, old)| match updates.remove(&key) {
        Some(updated) => updated,
        None => old.clone(),
    });
    let mut elements = Vec::with_capacity(len as usize);
    for position in 0..len {
        let element = match placed.remove(&position) {
            Some(element) => Some(element),
            None => retained.next(),
        };
        elements.push(element.ok_or(Desync::ListShape { expected: len })?);
    }
    Ok(elements)
}
