//! Arguments shared by several commands.

use clap::Args;
use sqlx::PgPool;
use storefront_app::{
    database,
    domain::customers::{
        CustomersService, PgCustomersService,
        records::{CustomerRecord, CustomerUuid},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

/// Selects one customer, by email or by UUID.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct CustomerArgs {
    /// Customer email address
    #[arg(long)]
    email: Option<String>,

    /// Customer UUID
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

impl CustomerArgs {
    pub(crate) async fn resolve(&self, pool: &PgPool) -> Result<CustomerRecord, String> {
        find_customer(pool, self.email.as_deref(), self.customer_uuid).await
    }
}

/// Email wins when both are given.
pub(crate) async fn find_customer(
    pool: &PgPool,
    email: Option<&str>,
    customer_uuid: Option<Uuid>,
) -> Result<CustomerRecord, String> {
    let customers = PgCustomersService::new(pool.clone());

    let found = match (email, customer_uuid) {
        (Some(email), _) => customers.find_customer_by_email(email).await,
        (None, Some(uuid)) => customers.get_customer(CustomerUuid::from_uuid(uuid)).await,
        (None, None) => return Err("pass --email or --customer-uuid".to_string()),
    };

    found.map_err(|error| format!("failed to find customer: {error}"))
}
