//! Increase Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{CartLineResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Increase Cart Line Handler
///
/// Adds one unit to an existing line.
#[endpoint(
    tags("cart"),
    summary = "Increase Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line incremented"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
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
        .increment(customer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use storefront::carts::CartLimitError;
    use testresult::TestResult;

    use storefront_app::domain::{carts::CartsServiceError, catalog::records::ProductUuid};

    use crate::test_helpers::MockServices;

    use super::*;

    #[tokio::test]
    async fn test_increase_past_quantity_limit_returns_409() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .carts
            .expect_increment()
            .once()
            .withf(move |_, p| *p == product)
            .return_once(|_, _| {
                Err(CartsServiceError::Limit(
                    CartLimitError::QuantityLimitExceeded { limit: 10 },
                ))
            });

        let res = TestClient::post(format!(
            "http://example.com/cart/items/{product}/increase"
        ))
        .send(&mocks.service(Router::with_path("cart/items/{product}/increase").post(handler)))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
