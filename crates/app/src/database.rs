//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow, query};

use crate::domain::customers::records::CustomerUuid;

/// SQL used to set customer context for row-level security.
pub const SET_CUSTOMER_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_customer_uuid', $1, true)";

/// SQL used to mark a transaction as an operator (back office) transaction.
pub const SET_OPERATOR_CONTEXT_SQL: &str = "SELECT set_config('app.operator', 'on', true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction without any row-level security context.
    ///
    /// Only tables without customer policies (catalog, customers) are visible.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction and set customer context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting customer context fails.
    pub async fn begin_customer_transaction(
        &self,
        customer: CustomerUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_CUSTOMER_CONTEXT_SQL)
            .bind(customer.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a transaction that may read and update every customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting operator context fails.
    pub async fn begin_operator_transaction(
        &self,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_OPERATOR_CONTEXT_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending migrations from `migrations/`.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative `INTEGER` column as `u32`.
pub(crate) fn try_get_u32(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Convert a `u32` into the `INTEGER` bound for `column`.
pub(crate) fn to_i32(value: u32, column: &str) -> sqlx::Result<i32> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
