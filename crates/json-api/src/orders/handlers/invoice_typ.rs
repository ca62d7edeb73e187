//! Typst Invoice Handler

use std::sync::Arc;

use salvo::{http::header::CONTENT_DISPOSITION, oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront::invoice::typst;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Typst Invoice Handler
///
/// Invoice as Typst source, ready to compile into a PDF.
#[endpoint(
    tags("orders"),
    summary = "Invoice (Typst)",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let order = order.into_inner();

    let invoice = state
        .app
        .orders
        .invoice(customer, order.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        CONTENT_DISPOSITION,
        format!("attachment; filename=\"invoice-{order}.typ\""),
        true,
    )
    .or_500("failed to set content disposition")?
    .render(Text::Plain(typst::render(&invoice)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::records::OrderUuid;

    use crate::{orders::invoice::tests::make_invoice, test_helpers::MockServices};

    use super::*;

    #[tokio::test]
    async fn test_typst_invoice_is_an_attachment() -> TestResult {
        let uuid = OrderUuid::new();
        let invoice = make_invoice(uuid)?;
        let mut mocks = MockServices::default();

        mocks
            .orders
            .expect_invoice()
            .once()
            .return_once(move |_, _| Ok(invoice));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}/invoice.typ"))
            .send(&mocks.service(Router::with_path("orders/{order}/invoice.typ").get(handler)))
            .await;

        let disposition = res
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = res.take_string().await?;

        assert_eq!(
            disposition,
            Some(format!("attachment; filename=\"invoice-{uuid}.typ\""))
        );
        assert!(body.starts_with("#set page(paper: \"a4\""));
        assert!(body.contains("\"Kettle\""));

        Ok(())
    }
}
