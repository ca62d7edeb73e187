//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::carts::CartLimits;
use storefront_app::domain::carts::records::CartSnapshot;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub quantity: u32,

    /// Current effective unit price
    pub unit_price: String,

    pub line_total: String,

    /// No further unit of this product may be added
    pub at_quantity_limit: bool,
}

/// Limits the store applies when a line grows.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLimitsResponse {
    pub max_quantity_per_item: u32,
    pub max_total_amount: String,
}

/// Priced cart, oldest line first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub total: String,

    /// ISO 4217 currency code of every amount
    pub currency: String,

    pub limits: CartLimitsResponse,
}

impl CartResponse {
    pub(crate) fn new(snapshot: CartSnapshot, state: &State) -> Self {
        let CartLimits {
            max_quantity_per_item,
            max_total_amount,
        } = state.cart_limits;

        let total = snapshot.total().to_string();

        CartResponse {
            items: snapshot
                .into_lines()
                .into_iter()
                .map(|line| CartItemResponse {
                    product_uuid: line.line.product_uuid.into(),
                    product_name: line.line.product_name,
                    at_quantity_limit: line.line.quantity >= max_quantity_per_item,
                    quantity: line.line.quantity,
                    unit_price: line.unit_price.to_string(),
                    line_total: line.line_total.to_string(),
                })
                .collect(),
            total,
            currency: state.currency_code().to_string(),
            limits: CartLimitsResponse {
                max_quantity_per_item,
                max_total_amount: max_total_amount.to_string(),
            },
        }
    }
}

/// Get Cart Handler
///
/// Prices the customer's cart with current product prices.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let snapshot = state
        .app
        .carts
        .snapshot(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(snapshot, state)))
}
