//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::customers::{
    data::NewCustomer,
    errors::CustomersServiceError,
    records::{CustomerRecord, CustomerUuid},
    repository::PgCustomersRepository,
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    pool: PgPool,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let created = self
            .repository
            .create_customer(&self.pool, customer)
            .await?;

        tracing::info!(customer = %created.uuid, "customer created");

        Ok(created)
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        self.repository
            .get_customer(&self.pool, customer)
            .await
            .map_err(Into::into)
    }

    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        self.repository
            .find_customer_by_email(&self.pool, email)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Customer persistence operations.
pub trait CustomersService: Send + Sync {
    /// Creates a new customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Look a customer up by email, ignoring case and surrounding whitespace.
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
