//! App Router

use salvo::Router;

use crate::{auth, carts, catalog, orders, wishlists};

pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("store").get(catalog::store::handler))
        .push(Router::with_path("products/{product}").get(catalog::get::handler))
        .push(
            Router::with_path("cart").get(carts::get::handler).push(
                Router::with_path("items/{product}")
                    .post(carts::add::handler)
                    .delete(carts::delete::handler)
                    .push(Router::with_path("increase").post(carts::increase::handler))
                    .push(Router::with_path("decrease").post(carts::decrease::handler)),
            ),
        )
        .push(Router::with_path("checkout").get(carts::checkout::handler))
        .push(
            Router::with_path("wishlist")
                .get(wishlists::index::handler)
                .push(
                    Router::with_path("items/{product}")
                        .post(wishlists::add::handler)
                        .delete(wishlists::delete::handler)
                        .push(
                            Router::with_path("move-to-cart").post(wishlists::move_to_cart::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("events").get(orders::events::handler))
                        .push(Router::with_path("payment").post(orders::payment::handler))
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(Router::with_path("return").post(orders::returns::handler))
                        .push(Router::with_path("invoice").get(orders::invoice::handler))
                        .push(Router::with_path("invoice.typ").get(orders::invoice_typ::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use storefront::orders::FulfillmentStatus;
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::{
        orders::invoice::tests::make_invoice,
        test_helpers::{MockServices, TEST_CUSTOMER_UUID, make_order},
    };

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_routes_require_bearer_token() -> TestResult {
        let mut mocks = MockServices::default();

        mocks.auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_subroutes_resolve_to_their_handlers() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .times(3)
            .returning(|_| Ok(TEST_CUSTOMER_UUID));

        mocks
            .orders
            .expect_invoice()
            .times(2)
            .returning(move |_, _| {
                make_invoice(uuid).map_err(|_ignored| OrdersServiceError::NotFound)
            });

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(move |_, _| Ok(make_order(uuid, FulfillmentStatus::Pending)));

        let service = make_service(mocks);

        let text = TestClient::get(format!("http://example.com/orders/{uuid}/invoice"))
            .add_header(AUTHORIZATION, "Bearer sf_v1_abc.def", true)
            .send(&service)
            .await
            .take_string()
            .await?;

        let typst = TestClient::get(format!("http://example.com/orders/{uuid}/invoice.typ"))
            .add_header(AUTHORIZATION, "Bearer sf_v1_abc.def", true)
            .send(&service)
            .await
            .take_string()
            .await?;

        let order = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .add_header(AUTHORIZATION, "Bearer sf_v1_abc.def", true)
            .send(&service)
            .await;

        assert!(text.starts_with("INVOICE"));
        assert!(typst.starts_with("#set page"));
        assert_eq!(order.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
