//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::{carts::CartEntry, pricing::ListPrice};

use crate::domain::{catalog::records::ProductUuid, customers::records::CustomerUuid};

/// Priced view of a customer's cart.
pub type CartSnapshot = storefront::carts::CartSnapshot<CartItemRecord>;

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line joined with the current price of its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub mrp: Option<Decimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartEntry for CartItemRecord {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn list_price(&self) -> ListPrice {
        ListPrice::new(self.price, self.mrp)
    }
}
