//! Payment Callback Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::orders::data::PaymentConfirmation;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Gateway callback body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentCallbackRequest {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub succeeded: bool,

    /// `razorpay_signature` from the checkout handler; required when `succeeded`.
    #[serde(default)]
    pub signature: Option<String>,
}

impl From<PaymentCallbackRequest> for PaymentConfirmation {
    fn from(request: PaymentCallbackRequest) -> Self {
        PaymentConfirmation {
            gateway_order_id: request.gateway_order_id,
            gateway_payment_id: request.gateway_payment_id,
            succeeded: request.succeeded,
            signature: request.signature,
        }
    }
}

/// Status axes of an order after a change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusResponse {
    pub order_uuid: Uuid,
    pub payment_status: String,
    pub fulfillment_status: String,
}

/// Payment Callback Handler
///
/// Records the gateway's verdict for a pending payment.
#[endpoint(
    tags("orders"),
    summary = "Confirm Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment status updated"),
        (status_code = StatusCode::CONFLICT, description = "Payment already settled, reference mismatch or bad signature"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PaymentCallbackRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .confirm_payment(customer, order.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    info!(order_uuid = %order.uuid, payment_status = %order.payment_status, "payment callback applied");

    Ok(Json(OrderStatusResponse {
        order_uuid: order.uuid.into(),
        payment_status: order.payment_status.to_string(),
        fulfillment_status: order.fulfillment_status.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::orders::{FulfillmentStatus, PaymentStatus, StatusAxis, TransitionError};
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{MockServices, make_order};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("orders/{order}/payment").post(handler))
    }

    #[tokio::test]
    async fn test_successful_payment_marks_order_paid() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_confirm_payment()
            .once()
            .withf(move |_, order, confirmation| {
                *order == uuid
                    && confirmation.gateway_order_id == "order_1"
                    && confirmation.gateway_payment_id == "pay_1"
                    && confirmation.succeeded
                    && confirmation.signature.as_deref() == Some("abc123")
            })
            .return_once(move |_, _, _| {
                let mut order = make_order(uuid, FulfillmentStatus::Pending).order;

                order.payment_status = PaymentStatus::Paid;

                Ok(order)
            });

        let response: OrderStatusResponse =
            TestClient::post(format!("http://example.com/orders/{uuid}/payment"))
                .json(&json!({
                    "gateway_order_id": "order_1",
                    "gateway_payment_id": "pay_1",
                    "succeeded": true,
                    "signature": "abc123"
                }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.order_uuid, uuid.into_uuid());
        assert_eq!(response.payment_status, "paid");

        Ok(())
    }

    #[tokio::test]
    async fn test_settled_payment_returns_409() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks.orders.expect_confirm_payment().once().return_once(|_, _, _| {
            Err(OrdersServiceError::InvalidTransition(TransitionError {
                axis: StatusAxis::Payment,
                from: "paid",
                to: "failed",
            }))
        });

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/payment"))
            .json(&json!({
                "gateway_order_id": "order_1",
                "gateway_payment_id": "pay_2",
                "succeeded": false
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_mismatched_reference_returns_409() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_confirm_payment()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::PaymentReferenceMismatch));

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/payment"))
            .json(&json!({
                "gateway_order_id": "order_other",
                "gateway_payment_id": "pay_1",
                "succeeded": true
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unsigned_success_returns_409() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_confirm_payment()
            .once()
            .withf(|_, _, confirmation| confirmation.signature.is_none())
            .return_once(|_, _, _| Err(OrdersServiceError::InvalidSignature));

        let res = TestClient::post(format!("http://example.com/orders/{uuid}/payment"))
            .json(&json!({
                "gateway_order_id": "order_1",
                "gateway_payment_id": "pay_1",
                "succeeded": true
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
