//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use storefront::carts::CartLimits;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        wishlists::{PgWishlistsService, WishlistsService},
    },
    health::{HealthService, PgHealthService},
    payments::PaymentGateway,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings the services need besides the database.
#[derive(Clone)]
pub struct AppSettings {
    pub cart_limits: CartLimits,
    pub currency: &'static Currency,
    pub gateway: Arc<dyn PaymentGateway>,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());
        let carts = PgCartsService::new(db.clone(), settings.cart_limits);

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            wishlists: Arc::new(PgWishlistsService::new(db.clone(), carts.clone())),
            health: Arc::new(PgHealthService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db,
                settings.gateway,
                settings.currency,
            )),
            carts: Arc::new(carts),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
