//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::orders::PaymentMethod;
use storefront_app::domain::orders::{
    data::PlaceOrder,
    records::{PaymentOutcome, PlacedOrder},
};

use crate::{
    extensions::*,
    orders::{BillingPayload, ShippingPayload, errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub billing: BillingPayload,

    /// Defaults to the billing address
    #[serde(default)]
    pub shipping: Option<ShippingPayload>,

    /// `cod` or `online`
    pub payment_method: String,

    #[serde(default)]
    pub accepted_terms: bool,
}

impl PlaceOrderRequest {
    fn into_place_order(self) -> Result<PlaceOrder, StatusError> {
        let payment_method = self
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        Ok(PlaceOrder {
            billing: self.billing.into(),
            shipping: self.shipping.unwrap_or_default().into(),
            payment_method,
            accepted_terms: self.accepted_terms,
        })
    }
}

/// What happened to the payment during checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    /// `not_required`, `initiated` or `failed`
    pub status: String,

    /// Gateway order to pay against, when initiated
    pub gateway_order_id: Option<String>,

    /// Gateway failure, when failed
    pub reason: Option<String>,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        let status = outcome.as_str().to_string();

        match outcome {
            PaymentOutcome::NotRequired => PaymentResponse {
                status,
                gateway_order_id: None,
                reason: None,
            },
            PaymentOutcome::Initiated { gateway_order_id } => PaymentResponse {
                status,
                gateway_order_id: Some(gateway_order_id),
                reason: None,
            },
            PaymentOutcome::Failed { reason } => PaymentResponse {
                status,
                gateway_order_id: None,
                reason: Some(reason),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlacedOrderResponse {
    pub order: OrderResponse,
    pub payment: PaymentResponse,
}

impl From<PlacedOrder> for PlacedOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        PlacedOrderResponse {
            order: placed.order.into(),
            payment: placed.payment.into(),
        }
    }
}

/// Place Order Handler
///
/// Turns the cart into an order. A gateway failure still creates the order, unpaid.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Terms not accepted or bad payment method"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlacedOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let form = json.into_inner().into_place_order()?;

    let placed = state
        .app
        .orders
        .place_order(customer, form)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", placed.order.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}
