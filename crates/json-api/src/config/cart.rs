//! Cart Config

use clap::Args;
use rust_decimal::Decimal;
use storefront::carts::CartLimits;

/// Limits enforced whenever a cart line grows.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Maximum units of one product in a cart
    #[arg(long, env = "MAX_CART_QTY_PER_ITEM", default_value_t = 10)]
    pub max_cart_qty_per_item: u32,

    /// Maximum cart total
    #[arg(long, env = "MAX_CART_TOTAL_AMOUNT", default_value = "200000")]
    pub max_cart_total_amount: Decimal,
}

impl CartConfig {
    /// Limits for the cart service.
    #[must_use]
    pub fn limits(&self) -> CartLimits {
        CartLimits {
            max_quantity_per_item: self.max_cart_qty_per_item,
            max_total_amount: self.max_cart_total_amount,
        }
    }
}
