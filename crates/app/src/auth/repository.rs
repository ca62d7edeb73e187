//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::records::{ApiTokenRecord, ApiTokenUuid},
    domain::customers::records::CustomerUuid,
};

const AUTHENTICATE_API_TOKEN_SQL: &str = include_str!("sql/authenticate_api_token.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const REVOKE_CUSTOMER_API_TOKENS_SQL: &str = include_str!("sql/revoke_customer_api_tokens.sql");

/// `api_tokens` has no row level security, so the repository works on the pool directly.
#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        uuid: ApiTokenUuid,
        customer: CustomerUuid,
        digest: &str,
    ) -> Result<ApiTokenRecord, sqlx::Error> {
        query_as::<Postgres, ApiTokenRecord>(CREATE_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(digest)
            .fetch_one(&self.pool)
            .await
    }

    /// Match an active token by id and digest and stamp its last use in one statement.
    pub(crate) async fn authenticate_api_token(
        &self,
        uuid: ApiTokenUuid,
        digest: &str,
    ) -> Result<Option<CustomerUuid>, sqlx::Error> {
        let customer: Option<Uuid> = query_scalar(AUTHENTICATE_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .bind(digest)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer.map(CustomerUuid::from_uuid))
    }

    pub(crate) async fn list_api_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ApiTokenRecord>, sqlx::Error> {
        query_as::<Postgres, ApiTokenRecord>(LIST_API_TOKENS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn revoke_api_token(
        &self,
        uuid: ApiTokenUuid,
    ) -> Result<Option<ApiTokenRecord>, sqlx::Error> {
        query_as::<Postgres, ApiTokenRecord>(REVOKE_API_TOKEN_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn revoke_customer_api_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let result = query(REVOKE_CUSTOMER_API_TOKENS_SQL)
            .bind(customer.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
