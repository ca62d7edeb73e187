//! Decrease Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartLineResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Decrease Cart Line Handler
///
/// Removes one unit; the line disappears when its last unit goes.
#[endpoint(
    tags("cart"),
    summary = "Decrease Quantity",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let product = product.into_inner();

    let remaining = state
        .app
        .carts
        .decrement(customer, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(remaining.map_or(
        CartLineResponse {
            product_uuid: product,
            quantity: 0,
        },
        Into::into,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::records::ProductUuid;

    use crate::test_helpers::{MockServices, make_cart_line};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("cart/items/{product}/decrease").post(handler))
    }

    #[tokio::test]
    async fn test_decrease_returns_remaining_quantity() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_decrement()
            .once()
            .return_once(move |_, _| Ok(Some(make_cart_line(product, 1))));

        let response: CartLineResponse = TestClient::post(format!(
            "http://example.com/cart/items/{product}/decrease"
        ))
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(response.quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_decrease_last_unit_reports_zero() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_decrement()
            .once()
            .return_once(|_, _| Ok(None));

        let response: CartLineResponse = TestClient::post(format!(
            "http://example.com/cart/items/{product}/decrease"
        ))
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(response.product_uuid, product.into_uuid());
        assert_eq!(response.quantity, 0);

        Ok(())
    }
}
