//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartLineResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Add To Cart Handler
///
/// Adds one unit, creating the line when the product is not in the cart yet.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line added or incremented"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
        (status_code = StatusCode::CONFLICT, description = "Cart limit reached"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let line = state
        .app
        .carts
        .add_item(customer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}
