//! Wishlists service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{PgCartsService, records::CartLineRecord, service::Growth},
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        wishlists::{
            errors::WishlistsServiceError, records::WishlistItemRecord,
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    repository: PgWishlistsRepository,
    catalog: PgCatalogRepository,
    customers: PgCustomersRepository,
    carts: PgCartsService,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db, carts: PgCartsService) -> Self {
        Self {
            db,
            repository: PgWishlistsRepository::new(),
            catalog: PgCatalogRepository::new(),
            customers: PgCustomersRepository::new(),
            carts,
        }
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn list(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let items = self.repository.list_items(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.catalog.get_product(&mut tx, product).await?;
        self.repository.add_entry(&mut tx, customer, product).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn remove(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.repository
            .delete_entry(&mut tx, customer, product)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn move_to_cart(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, WishlistsServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.customers.lock_customer(&mut tx, customer).await?;

        let removed = self
            .repository
            .delete_entry(&mut tx, customer, product)
            .await?;

        let line = self
            .carts
            .grow_line(&mut tx, customer, product, Growth::AddOrIncrement)
            .await?;

        tx.commit().await?;

        debug!(
            customer = %customer,
            product = %product,
            was_wishlisted = removed > 0,
            quantity = line.quantity,
            "moved wishlist entry to cart"
        );

        Ok(line)
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// Wishlisted products, newest first.
    async fn list(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError>;

    /// Add a product. Adding a product twice keeps a single entry.
    async fn add(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;

    /// Remove a product. Removing a missing entry succeeds.
    async fn remove(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;

    /// Remove the entry, if any, and add one unit of the product to the cart, atomically.
    ///
    /// A product that is not wishlisted is still added. When the cart refuses the unit the
    /// entry stays on the wishlist.
    async fn move_to_cart(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, WishlistsServiceError>;
}
