//! Wishlist Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::pricing::ListPrice;

use crate::domain::{catalog::records::ProductUuid, customers::records::CustomerUuid};

/// Wishlist entry joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItemRecord {
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub price: Decimal,
    pub mrp: Option<Decimal>,
    pub created_at: Timestamp,
}

impl WishlistItemRecord {
    /// Selling price and MRP, for the pricing engine.
    #[must_use]
    pub fn list_price(&self) -> ListPrice {
        ListPrice::new(self.price, self.mrp)
    }
}
