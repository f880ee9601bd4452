//! # Admin Console
//!
//! The shop owner's side: maintain customers and their favorites, hand out order links and
//! rearrange product lists.
//!
//! Every operation first checks that the auth provider still has a session. Store failures are
//! returned as errors *and* reported as an error [`Notice`]; successful writes add a success
//! notice and reload the listing. Destructive operations ask a [`Confirm`] first.

use crate::auth::{AuthError, AuthProvider, Session};
use crate::clients::{CustomerClient, ProductClient};
use crate::customer_actor::CustomerError;
use crate::model::{
    normalize_volume, CustomerCreate, CustomerId, CustomerWithProducts, ProductCreate, ProductId,
    ProductUpdate,
};
use crate::notice::Notice;
use crate::order::{copy_to_clipboard, customer_order_url, Clipboard, MemoryClipboard};
use crate::product_actor::ProductError;
use crate::reorder::{ReorderCoordinator, ReorderError};
use resource_store::ActorClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const CONFIRM_DELETE_PRODUCT: &str = "この商品を削除しますか？";
pub const CONFIRM_DELETE_CUSTOMER: &str = "この顧客を削除しますか？\n（紐づく商品も全て削除されます）";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("No customer selected")]
    NoCustomerSelected,

    #[error("Customer not in the current listing: {0}")]
    UnknownCustomer(CustomerId),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Asks the user a yes/no question.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct AdminConsole {
    customers: CustomerClient,
    products: ProductClient,
    auth: Arc<dyn AuthProvider>,
    confirm: Box<dyn Confirm>,
    clipboard: Arc<dyn Clipboard>,
    base_url: String,
    session: Session,
    listing: Vec<CustomerWithProducts>,
    selected: Option<CustomerId>,
    reorder: Option<ReorderCoordinator>,
    notices: Vec<Notice>,
}

impl AdminConsole {
    /// Opens the console for the current session and loads the customer listing.
    ///
    /// Without a confirmation handler every destructive operation is declined; without a
    /// clipboard, copies go to an in-memory one. See [`with_confirm`](Self::with_confirm) and
    /// [`with_clipboard`](Self::with_clipboard).
    pub async fn open(
        customers: CustomerClient,
        products: ProductClient,
        auth: Arc<dyn AuthProvider>,
        base_url: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let session = auth
            .current_session()
            .await
            .ok_or(AdminError::Unauthenticated)?;
        info!(email = %session.email, "Admin console opened");

        let mut console = Self {
            customers,
            products,
            auth,
            confirm: Box::new(|_: &str| false),
            clipboard: Arc::new(MemoryClipboard::new()),
            base_url: base_url.into(),
            session,
            listing: Vec::new(),
            selected: None,
            reorder: None,
            notices: Vec::new(),
        };
        console.refresh().await?;
        Ok(console)
    }

    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Customers, newest first.
    pub fn customers(&self) -> &[CustomerWithProducts] {
        &self.listing
    }

    pub fn selected(&self) -> Option<&CustomerWithProducts> {
        let id = self.selected?;
        self.listing.iter().find(|c| c.customer.id == id)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Reloads the listing. The selection survives if the customer still exists.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), AdminError> {
        self.require_session().await?;
        let listing = match self.customers.list_customers().await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(error = %e, "Fetching customers failed");
                self.notices.push(Notice::error("データの取得に失敗しました"));
                return Err(e.into());
            }
        };
        self.listing = listing;
        self.sync_selection();
        Ok(())
    }

    /// Selects the customer whose products are edited and reordered.
    pub fn select(&mut self, customer_id: CustomerId) -> Result<(), AdminError> {
        let entry = self
            .listing
            .iter()
            .find(|c| c.customer.id == customer_id)
            .ok_or(AdminError::UnknownCustomer(customer_id))?;
        self.reorder = Some(ReorderCoordinator::new(
            self.products.clone(),
            customer_id,
            entry.products.clone(),
        ));
        self.selected = Some(customer_id);
        Ok(())
    }

    /// Adds a customer. A blank name is ignored and yields `None`.
    #[instrument(skip(self))]
    pub async fn add_customer(&mut self, name: &str) -> Result<Option<CustomerId>, AdminError> {
        self.require_session().await?;
        if name.trim().is_empty() {
            return Ok(None);
        }
        match self.customers.create_customer(CustomerCreate::new(name)).await {
            Ok(id) => {
                self.notices.push(Notice::success("顧客を追加しました"));
                self.refresh().await?;
                Ok(Some(id))
            }
            Err(e) => {
                warn!(error = %e, "Adding customer failed");
                self.notices.push(Notice::error("顧客の追加に失敗しました"));
                Err(e.into())
            }
        }
    }

    /// Deletes a customer and all its products. Returns `false` when the user declined.
    #[instrument(skip(self))]
    pub async fn delete_customer(&mut self, customer_id: CustomerId) -> Result<bool, AdminError> {
        self.require_session().await?;
        if !self.confirm.confirm(CONFIRM_DELETE_CUSTOMER) {
            return Ok(false);
        }
        if let Err(e) = self.customers.delete(customer_id).await {
            warn!(%customer_id, error = %e, "Deleting customer failed");
            self.notices.push(Notice::error("顧客の削除に失敗しました"));
            return Err(e.into());
        }

        self.notices.push(Notice::success("顧客を削除しました"));
        self.listing.retain(|c| c.customer.id != customer_id);
        if self.selected == Some(customer_id) {
            self.selected = None;
            self.reorder = None;
        }
        Ok(true)
    }

    /// Appends a product to the selected customer's list. A blank name is ignored and yields
    /// `None`; a blank volume is stored as `-`.
    #[instrument(skip(self))]
    pub async fn add_product(
        &mut self,
        name: &str,
        volume: &str,
    ) -> Result<Option<ProductId>, AdminError> {
        self.require_session().await?;
        let customer_id = self.selected.ok_or(AdminError::NoCustomerSelected)?;
        if name.trim().is_empty() {
            return Ok(None);
        }

        let created = match self.products.next_display_order(customer_id).await {
            Ok(position) => {
                let params =
                    ProductCreate::new(customer_id, name, volume).with_display_order(position);
                self.products.create_product(params).await
            }
            Err(e) => Err(e),
        };

        match created {
            Ok(id) => {
                self.notices.push(Notice::success("商品を追加しました"));
                self.refresh().await?;
                Ok(Some(id))
            }
            Err(e) => {
                warn!(%customer_id, error = %e, "Adding product failed");
                self.notices.push(Notice::error("商品の追加に失敗しました"));
                Err(e.into())
            }
        }
    }

    /// Renames a product and changes its volume. A blank name leaves it untouched and yields
    /// `false`.
    #[instrument(skip(self))]
    pub async fn edit_product(
        &mut self,
        product_id: ProductId,
        name: &str,
        volume: &str,
    ) -> Result<bool, AdminError> {
        self.require_session().await?;
        if name.trim().is_empty() {
            return Ok(false);
        }
        let update = ProductUpdate {
            name: Some(name.trim().to_string()),
            volume: Some(normalize_volume(volume)),
            display_order: None,
        };
        match self.products.update_product(product_id, update).await {
            Ok(_) => {
                self.notices.push(Notice::success("商品を更新しました"));
                self.refresh().await?;
                Ok(true)
            }
            Err(e) => {
                warn!(%product_id, error = %e, "Updating product failed");
                self.notices.push(Notice::error("商品の更新に失敗しました"));
                Err(e.into())
            }
        }
    }

    /// Deletes a product. Returns `false` when the user declined.
    #[instrument(skip(self))]
    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<bool, AdminError> {
        self.require_session().await?;
        if !self.confirm.confirm(CONFIRM_DELETE_PRODUCT) {
            return Ok(false);
        }
        match self.products.delete(product_id).await {
            Ok(()) => {
                self.notices.push(Notice::success("商品を削除しました"));
                self.refresh().await?;
                Ok(true)
            }
            Err(e) => {
                warn!(%product_id, error = %e, "Deleting product failed");
                self.notices.push(Notice::error("商品の削除に失敗しました"));
                Err(e.into())
            }
        }
    }

    pub fn order_url(&self, customer_id: CustomerId) -> String {
        customer_order_url(&self.base_url, customer_id)
    }

    /// Copies a customer's order link to the clipboard.
    pub async fn copy_order_url(&mut self, customer_id: CustomerId) -> bool {
        let url = self.order_url(customer_id);
        let copied = copy_to_clipboard(self.clipboard.as_ref(), &url).await;
        self.notices.push(if copied {
            Notice::success("URLをコピーしました")
        } else {
            Notice::error("コピーに失敗しました")
        });
        copied
    }

    /// Moves a product of the selected customer from one position to another and persists the
    /// new order. After a failed save the listing shows what the store actually holds.
    #[instrument(skip(self))]
    pub async fn reorder(&mut self, from: usize, to: usize) -> Result<(), AdminError> {
        self.require_session().await?;
        let coordinator = self.reorder.as_mut().ok_or(AdminError::NoCustomerSelected)?;
        let result = coordinator.move_product(from, to).await;

        let customer_id = coordinator.customer_id();
        let products = coordinator.products().to_vec();
        if let Some(entry) = self.listing.iter_mut().find(|c| c.customer.id == customer_id) {
            entry.products = products;
        }

        match result {
            Ok(()) => Ok(()),
            Err(e @ (ReorderError::PersistFailed { .. } | ReorderError::RecoveryFailed { .. })) => {
                warn!(%customer_id, error = %e, "Saving new order failed");
                self.notices.push(Notice::error("並び替えの保存に失敗しました"));
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ends the session and closes the console, handing back the notices not yet shown.
    pub async fn sign_out(mut self) -> Result<Vec<Notice>, AdminError> {
        self.auth.sign_out().await?;
        info!(email = %self.session.email, "Admin console closed");
        self.notices.push(Notice::success("ログアウトしました"));
        Ok(self.notices)
    }

    async fn require_session(&self) -> Result<(), AdminError> {
        match self.auth.current_session().await {
            Some(session) if session.token == self.session.token => Ok(()),
            _ => Err(AdminError::Unauthenticated),
        }
    }

    fn sync_selection(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        match self.listing.iter().find(|c| c.customer.id == id) {
            Some(entry) => {
                let products = entry.products.clone();
                let replaced = self
                    .reorder
                    .as_mut()
                    .map(|coordinator| coordinator.replace(products.clone()).is_ok())
                    .unwrap_or(false);
                if !replaced {
                    self.reorder = Some(ReorderCoordinator::new(self.products.clone(), id, products));
                }
            }
            None => {
                self.selected = None;
                self.reorder = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::config::AdminCredentials;
    use crate::model::{Customer, Product};
    use resource_store::mock::MockClient;
    use resource_store::FrameworkError;
    use secrecy::SecretString;

    fn auth() -> Arc<StaticCredentials> {
        Arc::new(StaticCredentials::new(AdminCredentials {
            email: "owner@example.jp".to_string(),
            password: SecretString::from("pw".to_string()),
        }))
    }

    fn clients(
        customers: &MockClient<Customer>,
        products: &MockClient<Product>,
    ) -> (CustomerClient, ProductClient) {
        let products = ProductClient::new(products.client());
        (
            CustomerClient::new(customers.client(), products.clone()),
            products,
        )
    }

    #[tokio::test]
    async fn test_open_requires_session() {
        let customer_mock = MockClient::<Customer>::new();
        let product_mock = MockClient::<Product>::new();
        let (customers, products) = clients(&customer_mock, &product_mock);

        let result = AdminConsole::open(customers, products, auth(), "http://localhost").await;
        assert!(matches!(result, Err(AdminError::Unauthenticated)));
        customer_mock.verify();
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_notice() {
        let mut customer_mock = MockClient::<Customer>::new();
        let product_mock = MockClient::<Product>::new();
        customer_mock.expect_list().return_ok(Vec::new());
        customer_mock
            .expect_list()
            .return_err(FrameworkError::ActorClosed);
        let (customers, products) = clients(&customer_mock, &product_mock);

        let auth = auth();
        auth.sign_in("owner@example.jp", "pw").await.unwrap();
        let mut console = AdminConsole::open(customers, products, auth, "http://localhost")
            .await
            .unwrap();
        assert!(console.customers().is_empty());

        assert!(console.refresh().await.is_err());
        assert_eq!(
            console.take_notices(),
            vec![Notice::error("データの取得に失敗しました")]
        );
        customer_mock.verify();
    }

    #[tokio::test]
    async fn test_operations_stop_after_session_ends() {
        let mut customer_mock = MockClient::<Customer>::new();
        let product_mock = MockClient::<Product>::new();
        customer_mock.expect_list().return_ok(Vec::new());
        let (customers, products) = clients(&customer_mock, &product_mock);

        let auth = auth();
        auth.sign_in("owner@example.jp", "pw").await.unwrap();
        let mut console = AdminConsole::open(customers, products, auth.clone(), "http://localhost")
            .await
            .unwrap();

        auth.sign_out().await.unwrap();
        assert_eq!(
            console.add_customer("居酒屋たなか").await,
            Err(AdminError::Unauthenticated)
        );
        customer_mock.verify();
    }
}
