//! # List Queries
//!
//! A [`Query`] is the read-with-filter half of the store contract: an optional record filter and
//! an optional ordering column. Records are matched with [`ActorEntity::matches`] and sorted with
//! [`ActorEntity::compare`].

use crate::entity::ActorEntity;
use std::cmp::Ordering;
use std::fmt;

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Filter + ordering for a list request.
pub struct Query<T: ActorEntity> {
    pub filter: Option<T::Filter>,
    pub order: Option<(T::Column, Direction)>,
}

impl<T: ActorEntity> Query<T> {
    /// Every record, in store order.
    pub fn all() -> Self {
        Self {
            filter: None,
            order: None,
        }
    }

    /// Only records matching `filter`.
    pub fn filtered(filter: T::Filter) -> Self {
        Self {
            filter: Some(filter),
            order: None,
        }
    }

    pub fn order_by(mut self, column: T::Column, direction: Direction) -> Self {
        self.order = Some((column, direction));
        self
    }

    pub(crate) fn accepts(&self, item: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| item.matches(f))
    }

    pub(crate) fn sort(&self, items: &mut [T]) {
        if let Some((column, direction)) = &self.order {
            items.sort_by(|a, b| {
                let ord = a.compare(b, column);
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
    }
}

impl<T: ActorEntity> Default for Query<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T: ActorEntity> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filter", &self.filter)
            .field("order", &self.order)
            .finish()
    }
}

/// Helper for `compare` implementations: `None` sorts after every `Some`.
pub fn nulls_last<V: Ord>(a: Option<&V>, b: Option<&V>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_last_orders_missing_values_after_present_ones() {
        assert_eq!(nulls_last(Some(&1), Some(&2)), Ordering::Less);
        assert_eq!(nulls_last(Some(&9), None), Ordering::Less);
        assert_eq!(nulls_last::<i32>(None, Some(&0)), Ordering::Greater);
        assert_eq!(nulls_last::<i32>(None, None), Ordering::Equal);
    }
}
