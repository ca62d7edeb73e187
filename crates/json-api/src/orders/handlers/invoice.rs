//! Invoice Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Invoice Handler
///
/// Printable A4 text invoice.
#[endpoint(
    tags("orders"),
    summary = "Invoice",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plain text invoice"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let invoice = state
        .app
        .orders
        .invoice(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let mut page = Vec::new();

    invoice
        .write_a4(&mut page)
        .or_500("failed to write invoice")?;

    res.render(Text::Plain(
        String::from_utf8(page).or_500("invoice is not valid utf-8")?,
    ));

    Ok(())
}
