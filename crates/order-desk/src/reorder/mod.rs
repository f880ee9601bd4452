//! # Product Reorder
//!
//! Drag-and-drop reordering of a customer's favorites. The UI reports a move as
//! `(from_index, to_index)`; the [`ReorderCoordinator`] applies it to its local copy at once,
//! renumbers every product's `display_order` to its new position and writes all of them back
//! concurrently.
//!
//! ```text
//!          begin_drag            drop_at               commit: all ok
//!   Idle ─────────────► Dragging ───────► Committing ───────────────► Idle
//!    ▲                     │ cancel_drag       │ commit: any failed
//!    └─────────────────────┘                   ▼
//!    ▲                                    Reverting ── re-fetch ──────┐
//!    └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write is not retried and the successful writes are not undone. The coordinator
//! reloads the list from the store instead, so it ends up showing exactly what was persisted.

pub mod coordinator;

pub use coordinator::*;

use crate::model::{Product, ProductId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderState {
    #[default]
    Idle,
    Dragging {
        from: usize,
    },
    Committing,
    Reverting,
}

/// One write of the commit fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOrderAssignment {
    pub product_id: ProductId,
    pub display_order: i64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReorderError {
    #[error("Index {index} is out of range for {len} products")]
    InvalidIndex { index: usize, len: usize },

    #[error("Cannot {action} while {state:?}")]
    InvalidState {
        action: &'static str,
        state: ReorderState,
    },

    /// Some writes failed; the list was reloaded from the store.
    #[error("{failed} of {total} display order updates failed")]
    PersistFailed { failed: usize, total: usize },

    /// Some writes failed and the reload failed too; the list before the drag was restored.
    #[error("{failed} of {total} display order updates failed and reload failed: {reason}")]
    RecoveryFailed {
        failed: usize,
        total: usize,
        reason: String,
    },
}

/// Moves the element at `from` so that it ends up at index `to`, shifting the ones in between.
/// Both indices must be inside the list; otherwise it is left untouched.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), ReorderError> {
    let len = list.len();
    if let Some(index) = [from, to].into_iter().find(|index| *index >= len) {
        return Err(ReorderError::InvalidIndex { index, len });
    }
    let item = list.remove(from);
    list.insert(to, item);
    Ok(())
}

/// Sets every product's `display_order` to its index and returns the matching writes.
pub fn assign_positions(products: &mut [Product]) -> Vec<DisplayOrderAssignment> {
    products
        .iter_mut()
        .zip(0_i64..)
        .map(|(product, position)| {
            product.display_order = Some(position);
            DisplayOrderAssignment {
                product_id: product.id,
                display_order: position,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_item_shifts_the_range_between() {
        let mut list = vec!['a', 'b', 'c', 'd', 'e'];
        move_item(&mut list, 2, 0).unwrap();
        assert_eq!(list, vec!['c', 'a', 'b', 'd', 'e']);

        move_item(&mut list, 0, 4).unwrap();
        assert_eq!(list, vec!['a', 'b', 'd', 'e', 'c']);
    }

    #[test]
    fn test_move_item_rejects_indices_past_the_end() {
        let mut list = vec!['a', 'b', 'c'];
        assert_eq!(
            move_item(&mut list, 3, 0),
            Err(ReorderError::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(
            move_item(&mut list, 0, 7),
            Err(ReorderError::InvalidIndex { index: 7, len: 3 })
        );
        assert_eq!(
            move_item(&mut Vec::<char>::new(), 0, 0),
            Err(ReorderError::InvalidIndex { index: 0, len: 0 })
        );
        assert_eq!(list, vec!['a', 'b', 'c']);
    }
}
