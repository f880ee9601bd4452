use super::{assign_positions, move_item, DisplayOrderAssignment, ReorderError, ReorderState};
use crate::clients::ProductClient;
use crate::model::{sort_by_display_order, CustomerId, Product};
use crate::product_actor::ProductError;
use futures::future::join_all;
use tracing::{info, instrument, warn};

/// Holds one admin session's working copy of a customer's product list.
pub struct ReorderCoordinator {
    products: ProductClient,
    customer_id: CustomerId,
    list: Vec<Product>,
    state: ReorderState,
    snapshot: Option<Vec<Product>>,
    pending: Vec<DisplayOrderAssignment>,
}

impl ReorderCoordinator {
    /// Wraps an already fetched list. It is sorted by the display rule.
    pub fn new(products: ProductClient, customer_id: CustomerId, mut list: Vec<Product>) -> Self {
        sort_by_display_order(&mut list);
        Self {
            products,
            customer_id,
            list,
            state: ReorderState::Idle,
            snapshot: None,
            pending: Vec::new(),
        }
    }

    /// Fetches the customer's list and wraps it.
    pub async fn load(products: ProductClient, customer_id: CustomerId) -> Result<Self, ProductError> {
        let list = products.list_for_customer(customer_id).await?;
        Ok(Self::new(products, customer_id, list))
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn products(&self) -> &[Product] {
        &self.list
    }

    pub fn state(&self) -> ReorderState {
        self.state
    }

    /// Replaces the working copy, e.g. after the admin added or removed a product.
    pub fn replace(&mut self, mut list: Vec<Product>) -> Result<(), ReorderError> {
        self.require_idle("replace the list")?;
        sort_by_display_order(&mut list);
        self.list = list;
        Ok(())
    }

    pub fn begin_drag(&mut self, from: usize) -> Result<(), ReorderError> {
        self.require_idle("start a drag")?;
        self.check_index(from)?;
        self.state = ReorderState::Dragging { from };
        Ok(())
    }

    pub fn cancel_drag(&mut self) {
        if matches!(self.state, ReorderState::Dragging { .. }) {
            self.state = ReorderState::Idle;
        }
    }

    /// Applies the move locally and renumbers the whole list.
    ///
    /// Returns the writes [`commit`](Self::commit) will send. Dropping onto the start index is a
    /// no-op that returns to `Idle` with nothing to write.
    pub fn drop_at(&mut self, to: usize) -> Result<Vec<DisplayOrderAssignment>, ReorderError> {
        let ReorderState::Dragging { from } = self.state else {
            return Err(ReorderError::InvalidState {
                action: "drop",
                state: self.state,
            });
        };
        self.check_index(to)?;

        if from == to {
            self.state = ReorderState::Idle;
            return Ok(Vec::new());
        }

        let snapshot = self.list.clone();
        move_item(&mut self.list, from, to)?;
        self.snapshot = Some(snapshot);
        self.pending = assign_positions(&mut self.list);
        self.state = ReorderState::Committing;
        info!(customer_id = %self.customer_id, from, to, "Reorder applied locally");
        Ok(self.pending.clone())
    }

    /// Persists the pending writes concurrently and waits for all of them.
    ///
    /// On any failure the optimistic list is discarded and reloaded from the store. Writes that
    /// did succeed are left in place.
    #[instrument(skip(self), fields(customer_id = %self.customer_id, total = self.pending.len()))]
    pub async fn commit(&mut self) -> Result<(), ReorderError> {
        if self.state != ReorderState::Committing {
            return Err(ReorderError::InvalidState {
                action: "commit",
                state: self.state,
            });
        }

        let pending = std::mem::take(&mut self.pending);
        let total = pending.len();
        let results = join_all(pending.iter().map(|assignment| {
            self.products
                .set_display_order(assignment.product_id, assignment.display_order)
        }))
        .await;

        let mut failed = 0;
        for (assignment, result) in pending.iter().zip(&results) {
            if let Err(e) = result {
                failed += 1;
                warn!(product_id = %assignment.product_id, error = %e, "Display order update failed");
            }
        }

        if failed == 0 {
            info!(total, "Reorder persisted");
            self.snapshot = None;
            self.state = ReorderState::Idle;
            return Ok(());
        }

        self.state = ReorderState::Reverting;
        let outcome = match self.products.list_for_customer(self.customer_id).await {
            Ok(list) => {
                info!(failed, total, "Reorder failed, list reloaded");
                self.list = list;
                ReorderError::PersistFailed { failed, total }
            }
            Err(e) => {
                warn!(failed, total, error = %e, "Reload after failed reorder failed");
                if let Some(snapshot) = self.snapshot.take() {
                    self.list = snapshot;
                }
                ReorderError::RecoveryFailed {
                    failed,
                    total,
                    reason: e.to_string(),
                }
            }
        };
        self.snapshot = None;
        self.state = ReorderState::Idle;
        Err(outcome)
    }

    /// `begin_drag`, `drop_at` and `commit` in one call.
    pub async fn move_product(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        self.begin_drag(from)?;
        if let Err(e) = self.drop_at(to) {
            self.cancel_drag();
            return Err(e);
        }
        if self.state == ReorderState::Idle {
            return Ok(());
        }
        self.commit().await
    }

    fn require_idle(&self, action: &'static str) -> Result<(), ReorderError> {
        if self.state == ReorderState::Idle {
            Ok(())
        } else {
            Err(ReorderError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ReorderError> {
        if index < self.list.len() {
            Ok(())
        } else {
            Err(ReorderError::InvalidIndex {
                index,
                len: self.list.len(),
            })
        }
    }
}
