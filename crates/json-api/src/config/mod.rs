//! Server configuration module

use clap::Parser;

use crate::config::{
    cart::CartConfig, db::DatabaseConfig, logging::LoggingConfig, payments::PaymentsConfig,
    server::ListenConfig,
};

pub(crate) mod cart;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod payments;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listen address and shutdown drain.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Cart limits.
    #[command(flatten)]
    pub cart: CartConfig,

    /// Currency and payment gateway settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace().as_secs(), 30);
        assert_eq!(config.cart.max_cart_qty_per_item, 10);
        assert_eq!(config.cart.max_cart_total_amount, Decimal::from(200_000));
        assert_eq!(config.payments.currency, "INR");
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn cart_limits_are_read_from_flags() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--max-cart-qty-per-item",
            "3",
            "--max-cart-total-amount",
            "999.50",
        ])?;

        let limits = config.cart.limits();

        assert_eq!(limits.max_quantity_per_item, 3);
        assert_eq!(limits.max_total_amount, "999.50".parse::<Decimal>()?);

        Ok(())
    }

    #[test]
    fn listen_address_and_grace_are_read_from_flags() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "-H",
            "127.0.0.1",
            "--port",
            "9000",
            "--shutdown-grace-secs",
            "5",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.server.shutdown_grace().as_secs(), 5);

        Ok(())
    }
}
