//! Wishlist Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::wishlists::records::WishlistItemRecord;

use crate::{extensions::*, state::State, wishlists::errors::into_status_error};

/// Wishlisted product with its current pricing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub price: String,
    pub mrp: Option<String>,
    pub discount_percent: u32,
    pub unit_price: String,

    /// When the product was wishlisted
    pub added_at: String,
}

impl From<WishlistItemRecord> for WishlistItemResponse {
    fn from(item: WishlistItemRecord) -> Self {
        let pricing = item.list_price();

        WishlistItemResponse {
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            price: item.price.to_string(),
            mrp: item.mrp.map(|mrp| mrp.to_string()),
            discount_percent: pricing.discount_percent(),
            unit_price: pricing.unit_price().to_string(),
            added_at: item.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    pub items: Vec<WishlistItemResponse>,
}

/// Wishlist Index Handler
///
/// Lists the customer's wishlist, newest first.
#[endpoint(
    tags("wishlist"),
    summary = "Get Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let items = state
        .app
        .wishlists
        .list(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
