//! Move To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::CartLineResponse, extensions::*, state::State, wishlists::errors::into_status_error,
};

/// Move To Cart Handler
///
/// Moves a product into the cart, dropping it from the wishlist if it was there. When the
/// cart refuses the unit the product stays wishlisted.
#[endpoint(
    tags("wishlist"),
    summary = "Move To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product moved"),
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
        .wishlists
        .move_to_cart(customer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::carts::CartLimitError;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::CartsServiceError, catalog::records::ProductUuid,
        wishlists::WishlistsServiceError,
    };

    use crate::test_helpers::{MockServices, make_cart_line};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("wishlist/items/{product}/move-to-cart").post(handler))
    }

    #[tokio::test]
    async fn test_move_returns_cart_line() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .wishlists
            .expect_move_to_cart()
            .once()
            .return_once(move |_, _| Ok(make_cart_line(product, 1)));

        let response: CartLineResponse = TestClient::post(format!(
            "http://example.com/wishlist/items/{product}/move-to-cart"
        ))
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(response.product_uuid, product.into_uuid());
        assert_eq!(response.quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_move_refused_by_cart_returns_409() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks.wishlists.expect_move_to_cart().once().return_once(|_, _| {
            Err(WishlistsServiceError::Cart(CartsServiceError::Limit(
                CartLimitError::QuantityLimitExceeded { limit: 10 },
            )))
        });

        let res = TestClient::post(format!(
            "http://example.com/wishlist/items/{product}/move-to-cart"
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
