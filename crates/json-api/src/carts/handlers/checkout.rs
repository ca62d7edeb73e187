//! Checkout Summary Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub cart: CartResponse,

    /// Whether an order can be placed from this cart
    pub ready: bool,
}

/// Checkout Summary Handler
///
/// The cart as it would be ordered right now.
#[endpoint(
    tags("cart"),
    summary = "Checkout Summary",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let snapshot = state
        .app
        .carts
        .snapshot(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CheckoutResponse {
        ready: !snapshot.is_empty(),
        cart: CartResponse::new(snapshot, state),
    }))
}
