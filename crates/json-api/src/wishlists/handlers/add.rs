//! Add To Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, wishlists::errors::into_status_error};

/// Add To Wishlist Handler
///
/// Wishlisting a product twice keeps one entry.
#[endpoint(
    tags("wishlist"),
    summary = "Add To Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product wishlisted"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    state
        .app
        .wishlists
        .add(customer, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::{
        catalog::records::ProductUuid, wishlists::WishlistsServiceError,
    };

    use crate::test_helpers::MockServices;

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("wishlist/items/{product}").post(handler))
    }

    #[tokio::test]
    async fn test_add_returns_204() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .wishlists
            .expect_add()
            .once()
            .withf(move |_, p| *p == product)
            .return_once(|_, _| Ok(()));

        let res = TestClient::post(format!("http://example.com/wishlist/items/{product}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let product = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .wishlists
            .expect_add()
            .once()
            .return_once(|_, _| Err(WishlistsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/wishlist/items/{product}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
