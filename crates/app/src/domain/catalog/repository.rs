//! Catalog Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{to_i32, try_get_u32},
    domain::catalog::{
        data::{NewBrand, NewCategory, NewDeal, NewProduct, PriceUpdate},
        records::{
            BrandRecord, BrandUuid, CategoryRecord, CategoryUuid, DealRecord, DealUuid,
            ProductRecord, ProductUuid,
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_PRICE_SQL: &str = include_str!("sql/update_product_price.sql");
const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const GET_ACTIVE_DEAL_SQL: &str = include_str!("sql/get_active_deal.sql");
const CREATE_DEAL_SQL: &str = include_str!("sql/create_deal.sql");
const ADD_DEAL_PRODUCTS_SQL: &str = include_str!("sql/add_deal_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category.map(CategoryUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.mrp)
            .bind(to_i32(product.stock, "stock")?)
            .bind(product.category_uuid.map(CategoryUuid::into_uuid))
            .bind(product.brand_uuid.map(BrandUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: PriceUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_PRICE_SQL)
            .bind(product.into_uuid())
            .bind(update.price)
            .bind(update.mrp)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: NewBrand,
    ) -> Result<BrandRecord, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(CREATE_BRAND_SQL)
            .bind(brand.uuid.into_uuid())
            .bind(brand.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_active_deal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<Option<DealRecord>, sqlx::Error> {
        query_as::<Postgres, DealRecord>(GET_ACTIVE_DEAL_SQL)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_deal(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        deal: NewDeal,
    ) -> Result<DealRecord, sqlx::Error> {
        let product_uuids: Vec<Uuid> = deal
            .product_uuids
            .iter()
            .map(|product| product.into_uuid())
            .collect();

        let created = query_as::<Postgres, DealRecord>(CREATE_DEAL_SQL)
            .bind(deal.uuid.into_uuid())
            .bind(deal.title)
            .bind(deal.active)
            .bind(SqlxTimestamp::from(deal.expires_at))
            .bind(&product_uuids)
            .fetch_one(&mut **tx)
            .await?;

        query(ADD_DEAL_PRODUCTS_SQL)
            .bind(created.uuid.into_uuid())
            .bind(&product_uuids)
            .execute(&mut **tx)
            .await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            mrp: row.try_get::<Option<Decimal>, _>("mrp")?,
            stock: try_get_u32(row, "stock")?,
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            brand_uuid: row
                .try_get::<Option<Uuid>, _>("brand_uuid")?
                .map(BrandUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BrandRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BrandUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DealRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DealUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            active: row.try_get("active")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            product_uuids: row
                .try_get::<Vec<Uuid>, _>("product_uuids")?
                .into_iter()
                .map(ProductUuid::from_uuid)
                .collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
