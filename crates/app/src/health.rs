//! Readiness of the storage backing the storefront.

use async_trait::async_trait;
use mockall::automock;
use sqlx::query_scalar;
use thiserror::Error;

use crate::database::Db;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("database unreachable")]
    Database(#[from] sqlx::Error),

    #[error("schema not migrated")]
    Unmigrated,
}

#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check(&self) -> Result<(), HealthError> {
        let migrated: bool = query_scalar("SELECT to_regclass('public.orders') IS NOT NULL")
            .fetch_one(self.db.pool())
            .await?;

        if migrated {
            Ok(())
        } else {
            Err(HealthError::Unmigrated)
        }
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Round trip to the database and confirm the order tables exist.
    async fn check(&self) -> Result<(), HealthError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn migrated_database_is_healthy() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.health.check().await?;

        Ok(())
    }

    #[tokio::test]
    async fn closed_pool_is_unhealthy() {
        let ctx = TestContext::new().await;
        let pool = ctx.db.pool().clone();

        pool.close().await;

        let result = PgHealthService::new(Db::new(pool)).check().await;

        assert!(
            matches!(result, Err(HealthError::Database(_))),
            "expected Database error, got {result:?}"
        );
    }
}
