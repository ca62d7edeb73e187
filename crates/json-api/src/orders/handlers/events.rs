//! Order Events Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderStatusEventRecord;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// One recorded status change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEventResponse {
    /// `fulfillment` or `payment`
    pub axis: String,
    pub status: String,
    pub created_at: String,
}

impl From<OrderStatusEventRecord> for OrderEventResponse {
    fn from(event: OrderStatusEventRecord) -> Self {
        OrderEventResponse {
            axis: event.axis.to_string(),
            status: event.status,
            created_at: event.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEventsResponse {
    pub events: Vec<OrderEventResponse>,
}

/// Order Events Handler
///
/// Status history of an order, oldest first.
#[endpoint(
    tags("orders"),
    summary = "Order Status History",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEventsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let events = state
        .app
        .orders
        .order_events(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEventsResponse {
        events: events.into_iter().map(Into::into).collect(),
    }))
}
