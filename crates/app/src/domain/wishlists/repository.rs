//! Wishlists Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::records::ProductUuid, customers::records::CustomerUuid,
    wishlists::records::WishlistItemRecord,
};

const LIST_WISHLIST_ITEMS_SQL: &str = include_str!("sql/list_wishlist_items.sql");
const ADD_WISHLIST_ENTRY_SQL: &str = include_str!("sql/add_wishlist_entry.sql");
const DELETE_WISHLIST_ENTRY_SQL: &str = include_str!("sql/delete_wishlist_entry.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistsRepository;

impl PgWishlistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<WishlistItemRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistItemRecord>(LIST_WISHLIST_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn add_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_WISHLIST_ENTRY_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_WISHLIST_ENTRY_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            price: row.try_get::<Decimal, _>("price")?,
            mrp: row.try_get::<Option<Decimal>, _>("mrp")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
