//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderDetails, OrderLineRecord};

use crate::{
    extensions::*,
    orders::{BillingPayload, ShippingPayload, errors::into_status_error},
    state::State,
};

/// Product line of an order, priced as it was bought.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// `None` once the product has left the catalog
    pub product_uuid: Option<Uuid>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        OrderLineResponse {
            product_uuid: line.product_uuid.map(Into::into),
            line_total: line.line_total().to_string(),
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub billing: BillingPayload,
    pub shipping: ShippingPayload,
    pub total: String,
    pub currency: String,
    pub payment_method: String,
    pub payment_status: String,
    pub fulfillment_status: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub lines: Vec<OrderLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        let order = details.order;

        OrderResponse {
            uuid: order.uuid.into(),
            billing: order.billing.into(),
            shipping: order.shipping.into(),
            total: order.total.to_string(),
            currency: order.currency,
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            fulfillment_status: order.fulfillment_status.to_string(),
            gateway_order_id: order.gateway_order_id,
            gateway_payment_id: order.gateway_payment_id,
            lines: details.lines.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Orders of other customers are reported as missing.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use storefront::orders::FulfillmentStatus;
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{MockServices, TEST_CUSTOMER_UUID, dec, make_order};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_order_returns_details() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |customer, order| *customer == TEST_CUSTOMER_UUID && *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, FulfillmentStatus::Pending)));

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let line = response.lines.first().ok_or("missing line")?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.fulfillment_status, "pending");
        assert_eq!(response.payment_method, "cod");
        assert_eq!(response.shipping.city, "Bengaluru");
        assert_eq!(response.total.parse::<Decimal>()?, dec("201"));
        assert_eq!(line.line_total.parse::<Decimal>()?, dec("201"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_foreign_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
