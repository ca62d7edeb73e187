//! Test context for service-level integration tests.

use std::sync::Arc;

use rust_decimal::Decimal;
use rusty_money::iso::INR;
use sqlx::{Connection, PgConnection, PgPool, query};
use storefront::carts::CartLimits;

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService,
        catalog::PgCatalogService,
        customers::{
            CustomersService, PgCustomersService, data::NewCustomer, records::CustomerUuid,
        },
        orders::PgOrdersService,
        wishlists::PgWishlistsService,
    },
    health::PgHealthService,
    payments::{DisabledGateway, PaymentGateway},
};

use super::db::TestDb;

/// Non-superuser role the services connect as, so row level security applies.
const APP_ROLE: &str = "storefront_app_test";
const APP_ROLE_PASSWORD: &str = "storefront_app_test_pass";

pub struct TestContext {
    pub db: TestDb,
    pub customer_uuid: CustomerUuid,
    pub limits: CartLimits,
    pub catalog: PgCatalogService,
    pub customers: PgCustomersService,
    pub carts: PgCartsService,
    pub wishlists: PgWishlistsService,
    pub orders: PgOrdersService,
    pub health: PgHealthService,
    app_db: Db,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let app_db = Db::new(Self::setup_app_pool(&test_db).await);

        let limits = CartLimits {
            max_quantity_per_item: 5,
            max_total_amount: Decimal::from(1000),
        };

        let carts = PgCartsService::new(app_db.clone(), limits);

        let mut ctx = Self {
            customer_uuid: CustomerUuid::new(),
            limits,
            catalog: PgCatalogService::new(app_db.clone()),
            customers: PgCustomersService::new(app_db.pool().clone()),
            wishlists: PgWishlistsService::new(app_db.clone(), carts.clone()),
            orders: PgOrdersService::new(app_db.clone(), Arc::new(DisabledGateway), INR),
            health: PgHealthService::new(app_db.clone()),
            carts,
            app_db,
            db: test_db,
        };

        ctx.customer_uuid = ctx.create_customer("customer@example.com").await;

        ctx
    }

    /// Orders service backed by a specific payment gateway.
    pub fn orders_with_gateway(&self, gateway: Arc<dyn PaymentGateway>) -> PgOrdersService {
        PgOrdersService::new(self.app_db.clone(), gateway, INR)
    }

    /// Create an additional customer, useful for isolation tests.
    pub async fn create_customer(&self, email: &str) -> CustomerUuid {
        let uuid = CustomerUuid::new();

        self.customers
            .create_customer(NewCustomer {
                uuid,
                name: "Test Customer".to_string(),
                email: email.to_string(),
            })
            .await
            .expect("Failed to create test customer");

        uuid
    }

    /// Create the app role (once per server) and return a pool connected as it.
    ///
    /// Superusers bypass row level security even when it is forced.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let su_url = &test_db.superuser_url;

        let postgres_url = su_url.rsplit_once('/').map_or(su_url.as_str(), |x| x.0);
        let postgres_url = format!("{postgres_url}/postgres");

        let mut server_conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to postgres database for role setup");

        // Parallel tests race to create the role; 42710 and 23505 both mean it exists.
        let created = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
               NOSUPERUSER NOCREATEDB NOCREATEROLE"
        ))
        .execute(&mut server_conn)
        .await;

        match created {
            Ok(_) => {}
            Err(sqlx::Error::Database(error))
                if matches!(error.code().as_deref(), Some("42710" | "23505")) => {}
            Err(error) => panic!("Failed to create app role: {error}"),
        }

        query(&format!(
            "GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}",
            test_db.name
        ))
        .execute(&mut server_conn)
        .await
        .expect("Failed to grant CONNECT on test database");

        server_conn
            .close()
            .await
            .expect("Failed to close server connection");

        let mut db_conn = PgConnection::connect(su_url)
            .await
            .expect("Failed to connect to test database for privilege setup");

        for stmt in [
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"
            ),
            format!("GRANT USAGE, SELECT ON ALL SEQUENCES IN SCHEMA public TO {APP_ROLE}"),
        ] {
            query(&stmt)
                .execute(&mut db_conn)
                .await
                .expect("Failed to grant table privileges to app role");
        }

        db_conn
            .close()
            .await
            .expect("Failed to close db connection");

        let app_url = su_url.replacen(
            "storefront_test:storefront_test_password",
            &format!("{APP_ROLE}:{APP_ROLE_PASSWORD}"),
            1,
        );

        PgPool::connect(&app_url)
            .await
            .expect("Failed to create app pool")
    }
}
