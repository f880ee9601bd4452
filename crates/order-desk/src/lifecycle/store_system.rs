use crate::clients::{CustomerClient, ProductClient};
use crate::config::AppConfig;
use crate::{customer_actor, product_actor};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running record stores and the clients to reach them.
///
/// ```ignore
/// let system = StoreSystem::new(&config);
/// let id = system.customer_client.create_customer(CustomerCreate::new("居酒屋たなか")).await?;
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    customer_handle: JoinHandle<()>,
    product_handle: JoinHandle<()>,
}

impl StoreSystem {
    /// Spawns both actors on the current Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (product_actor, product_inner) = product_actor::new(config.store_buffer);
        let (customer_actor, customer_inner) = customer_actor::new(config.store_buffer);

        let product_client = ProductClient::new(product_inner);
        let customer_client = CustomerClient::new(customer_inner, product_client.clone());

        // Products first: the customer actor's context holds a product client
        let product_handle = tokio::spawn(product_actor.run(()));
        let customer_handle = tokio::spawn(customer_actor.run(product_client.clone()));

        info!(buffer = config.store_buffer, "Store system started");
        Self {
            customer_client,
            product_client,
            customer_handle,
            product_handle,
        }
    }

    /// Stops both actors and waits for them.
    ///
    /// The customer actor goes first. Its context and the customer client both hold product
    /// clients, so the product actor only sees its channel close once the customer side is gone.
    ///
    /// Clones of the clients handed out earlier must be dropped before calling this, otherwise
    /// it waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store system...");

        drop(self.customer_client);
        if let Err(e) = self.customer_handle.await {
            error!("Customer actor task failed: {:?}", e);
            return Err(format!("Customer actor task failed: {:?}", e));
        }

        drop(self.product_client);
        if let Err(e) = self.product_handle.await {
            error!("Product actor task failed: {:?}", e);
            return Err(format!("Product actor task failed: {:?}", e));
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}
