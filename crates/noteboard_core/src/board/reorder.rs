//! Drag-and-drop reordering within one column.
//!
//! # Invariants
//! - A reorder is a single remove-and-reinsert; no merge logic.
//! - Dropping an item onto itself, or an unknown id, plans nothing.

use crate::model::entry::{Entry, EntryId};

/// Moves the element at `from` so it ends up at index `to`.
///
/// Out-of-range indices leave the slice untouched.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Computes the new column order after dropping `active` onto `over`.
///
/// Returns `None` when no persistence call should be issued.
pub fn plan_reorder(column: &[Entry], active: EntryId, over: EntryId) -> Option<Vec<Entry>> {
    if active == over {
        return None;
    }
    let from = column.iter().position(|entry| entry.id == active)?;
    let to = column.iter().position(|entry| entry.id == over)?;

    let mut reordered = column.to_vec();
    array_move(&mut reordered, from, to);
    Some(reordered)
}

#[cfg(test)]
mod tests {
    use super::array_move;

    #[test]
    fn array_move_forward_and_backward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        array_move(&mut items, 0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        array_move(&mut items, 3, 0);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn array_move_ignores_out_of_range() {
        let mut items = vec![1, 2];
        array_move(&mut items, 0, 5);
        assert_eq!(items, vec![1, 2]);
    }
}
