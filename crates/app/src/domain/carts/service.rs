//! Carts service.
//!
//! Every mutation runs in its own transaction and starts by locking the customer row,
//! so two requests for the same customer never read stale quantities or totals.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use storefront::carts::CartLimits;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            records::{CartLineRecord, CartSnapshot},
            repository::PgCartsRepository,
        },
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
    },
};

/// Whether growing a line may create it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    /// Create the line with quantity 1, or increment it when present.
    AddOrIncrement,

    /// Increment an existing line; a missing line is `NotFound`.
    IncrementExisting,
}

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    limits: CartLimits,
    repository: PgCartsRepository,
    catalog: PgCatalogRepository,
    customers: PgCustomersRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, limits: CartLimits) -> Self {
        Self {
            db,
            limits,
            repository: PgCartsRepository::new(),
            catalog: PgCatalogRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }

    /// Add one unit of `product` inside an existing customer transaction.
    ///
    /// The caller must already hold the customer lock.
    pub(crate) async fn grow_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
        growth: Growth,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let snapshot = CartSnapshot::new(self.repository.list_items(tx, customer).await?);

        let existing = snapshot
            .lines()
            .iter()
            .find(|line| line.line.product_uuid == product);

        let (current_quantity, unit_price) = match (existing, growth) {
            (Some(line), _) => (line.line.quantity, line.unit_price),
            (None, Growth::IncrementExisting) => return Err(CartsServiceError::NotFound),
            (None, Growth::AddOrIncrement) => {
                let product = self.catalog.get_product(tx, product).await?;

                (0, product.list_price().unit_price())
            }
        };

        let quantity = self
            .limits
            .check_increment(current_quantity, unit_price, snapshot.total())
            .inspect_err(|error| {
                debug!(customer = %customer, product = %product, %error, "cart limit reached");
            })?;

        let line = self
            .repository
            .upsert_line(tx, customer, product, quantity)
            .await?;

        Ok(line)
    }

    async fn begin_locked(
        &self,
        customer: CustomerUuid,
    ) -> Result<Transaction<'static, Postgres>, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.customers.lock_customer(&mut tx, customer).await?;

        Ok(tx)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.begin_locked(customer).await?;

        let line = self
            .grow_line(&mut tx, customer, product, Growth::AddOrIncrement)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn increment(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.begin_locked(customer).await?;

        let line = self
            .grow_line(&mut tx, customer, product, Growth::IncrementExisting)
            .await?;

        tx.commit().await?;

        Ok(line)
    }

    async fn decrement(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, CartsServiceError> {
        let mut tx = self.begin_locked(customer).await?;

        let remaining = match self.repository.get_line(&mut tx, customer, product).await? {
            None => None,
            Some(line) if line.quantity <= 1 => {
                self.repository
                    .delete_line(&mut tx, customer, product)
                    .await?;

                None
            }
            Some(line) => Some(
                self.repository
                    .upsert_line(&mut tx, customer, product, line.quantity - 1)
                    .await?,
            ),
        };

        tx.commit().await?;

        Ok(remaining)
    }

    async fn remove(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.begin_locked(customer).await?;

        self.repository
            .delete_line(&mut tx, customer, product)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn snapshot(&self, customer: CustomerUuid) -> Result<CartSnapshot, CartsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let items = self.repository.list_items(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(CartSnapshot::new(items))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add one unit of a product, creating the line when absent.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Increment an existing line by one.
    async fn increment(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Decrement a line by one, deleting it at zero. Returns the remaining line.
    async fn decrement(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, CartsServiceError>;

    /// Delete a line. Deleting a missing line succeeds.
    async fn remove(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Price the cart with current product prices.
    async fn snapshot(&self, customer: CustomerUuid) -> Result<CartSnapshot, CartsServiceError>;
}
