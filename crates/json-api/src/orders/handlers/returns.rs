//! Request Return Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderReturnRecord;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnRequest {
    pub reason: String,
}

/// Return Request Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub reason: String,

    /// Returns await operator approval
    pub approved: bool,
    pub created_at: String,
}

impl From<OrderReturnRecord> for ReturnResponse {
    fn from(record: OrderReturnRecord) -> Self {
        ReturnResponse {
            uuid: record.uuid.into(),
            order_uuid: record.order_uuid.into(),
            reason: record.reason,
            approved: record.approved,
            created_at: record.created_at.to_string(),
        }
    }
}

/// Request Return Handler
///
/// Only delivered orders can be returned.
#[endpoint(
    tags("orders"),
    summary = "Request Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Return requested"),
        (status_code = StatusCode::CONFLICT, description = "Order is not delivered"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<ReturnRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReturnResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let record = state
        .app
        .orders
        .request_return(customer, order.into_inner().into(), json.into_inner().reason)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}
