//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::ProductRecord;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Product with its effective pricing. Amounts are decimal strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,

    /// Selling price
    pub price: String,

    /// Maximum retail price, when advertised
    pub mrp: Option<String>,

    /// Whole-number discount against the MRP
    pub discount_percent: u32,

    /// Price charged per unit
    pub unit_price: String,

    pub stock: u32,
    pub category_uuid: Option<Uuid>,
    pub brand_uuid: Option<Uuid>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        let pricing = product.list_price();

        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            mrp: product.mrp.map(|mrp| mrp.to_string()),
            discount_percent: pricing.discount_percent(),
            unit_price: pricing.unit_price().to_string(),
            stock: product.stock,
            category_uuid: product.category_uuid.map(Into::into),
            brand_uuid: product.brand_uuid.map(Into::into),
        }
    }
}

/// Get Product Handler
///
/// Returns a product with its pricing.
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::{CatalogServiceError, records::ProductUuid};

    use crate::test_helpers::{MockServices, dec, make_product};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_discounted_pricing() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .catalog
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_product(uuid, "100", Some("150"))));

        let response: ProductResponse =
            TestClient::get(format!("http://example.com/products/{uuid}"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.discount_percent, 33);
        assert_eq!(response.unit_price.parse::<Decimal>()?, dec("100.5"));
        assert_eq!(response.mrp.as_deref(), Some("150"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .catalog
            .expect_get_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_malformed_uuid_returns_400() -> TestResult {
        let mut mocks = MockServices::default();

        mocks.catalog.expect_get_product().never();

        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
