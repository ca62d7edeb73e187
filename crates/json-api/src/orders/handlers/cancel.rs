//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, payment::OrderStatusResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Possible until the order is delivered.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::CONFLICT, description = "Order can no longer be cancelled"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .cancel_order(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderStatusResponse {
        order_uuid: order.uuid.into(),
        payment_status: order.payment_status.to_string(),
        fulfillment_status: order.fulfillment_status.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::orders::{FulfillmentStatus, StatusAxis, TransitionError};
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{MockServices, make_order};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("orders/{order}/cancel").post(handler))
    }

    #[tokio::test]
    async fn test_cancel_pending_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_cancel_order()
            .once()
            .withf(move |_, order| *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, FulfillmentStatus::Cancelled).order));

        let response: OrderStatusResponse =
            TestClient::post(format!("http://example.com/orders/{uuid}/cancel"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.fulfillment_status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_delivered_order_returns_409() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks.orders.expect_cancel_order().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition(TransitionError {
                axis: StatusAxis::Fulfillment,
                from: "delivered",
                to: "cancelled",
            }))
        });

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/cancel"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
