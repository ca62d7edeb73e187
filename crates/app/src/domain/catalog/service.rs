//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewBrand, NewCategory, NewDeal, NewProduct, PriceUpdate},
        errors::CatalogServiceError,
        records::{BrandRecord, CategoryRecord, CategoryUuid, DealRecord, ProductRecord, ProductUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, category).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let brands = self.repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn get_active_deal(
        &self,
        now: Timestamp,
    ) -> Result<Option<DealRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let deal = self.repository.get_active_deal(&mut tx, now).await?;

        tx.commit().await?;

        Ok(deal)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_brand(&mut tx, brand).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        tracing::info!(product = %created.uuid, price = %created.price, "product created");

        Ok(created)
    }

    async fn update_product_price(
        &self,
        product: ProductUuid,
        update: PriceUpdate,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product_price(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn create_deal(&self, deal: NewDeal) -> Result<DealRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_deal(&mut tx, deal).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// List products ordered by name, optionally restricted to one category.
    async fn list_products(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// List all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// List all brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError>;

    /// The live deal that expires soonest, if any.
    async fn get_active_deal(
        &self,
        now: Timestamp,
    ) -> Result<Option<DealRecord>, CatalogServiceError>;

    /// Creates a category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a brand.
    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError>;

    /// Creates a product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Replace a product's selling price and MRP.
    async fn update_product_price(
        &self,
        product: ProductUuid,
        update: PriceUpdate,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a deal covering the given products.
    async fn create_deal(&self, deal: NewDeal) -> Result<DealRecord, CatalogServiceError>;
}
