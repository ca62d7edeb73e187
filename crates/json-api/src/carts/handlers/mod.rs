//! Cart Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::CartLineRecord;

pub(crate) mod add;
pub(crate) mod checkout;
pub(crate) mod decrease;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod increase;

/// Quantity of one cart line after a change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,

    /// Units now in the cart; zero once the line is gone
    pub quantity: u32,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        CartLineResponse {
            product_uuid: line.product_uuid.into(),
            quantity: line.quantity,
        }
    }
}
