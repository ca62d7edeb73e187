//! Store Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::{CategoryRecord, DealRecord};

use crate::{
    catalog::{errors::into_status_error, get::ProductResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DealResponse {
    pub uuid: Uuid,
    pub title: String,

    /// When the deal ends (RFC 3339)
    pub expires_at: String,

    pub product_uuids: Vec<Uuid>,
}

impl From<DealRecord> for DealResponse {
    fn from(deal: DealRecord) -> Self {
        DealResponse {
            uuid: deal.uuid.into(),
            title: deal.title,
            expires_at: deal.expires_at.to_string(),
            product_uuids: deal.product_uuids.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    pub products: Vec<ProductResponse>,
    pub categories: Vec<CategoryResponse>,

    /// The live deal that ends soonest
    pub deal: Option<DealResponse>,
}

/// Store Handler
///
/// Lists products, optionally within one category, with the categories and the live deal.
#[endpoint(
    tags("catalog"),
    summary = "Store Listing",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<StoreResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let catalog = &state.app.catalog;

    let products = catalog
        .list_products(category.into_inner().map(Into::into))
        .await
        .map_err(into_status_error)?;

    let categories = catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    let deal = catalog
        .get_active_deal(Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(StoreResponse {
        products: products.into_iter().map(Into::into).collect(),
        categories: categories.into_iter().map(Into::into).collect(),
        deal: deal.map(Into::into),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::catalog::{
        CatalogServiceError,
        records::{CategoryUuid, DealUuid, ProductUuid},
    };

    use crate::test_helpers::{MockServices, make_product, sqlx_pool_closed};

    use super::*;

    fn make_service(mocks: MockServices) -> Service {
        mocks.service(Router::with_path("store").get(handler))
    }

    #[tokio::test]
    async fn test_store_lists_products_categories_and_deal() -> TestResult {
        let product = ProductUuid::new();
        let category = CategoryUuid::new();
        let deal = DealUuid::new();

        let mut mocks = MockServices::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .withf(|filter| filter.is_none())
            .return_once(move |_| Ok(vec![make_product(product, "20", None)]));

        mocks
            .catalog
            .expect_list_categories()
            .once()
            .return_once(move || {
                Ok(vec![CategoryRecord {
                    uuid: category,
                    name: "Kitchen".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                }])
            });

        mocks
            .catalog
            .expect_get_active_deal()
            .once()
            .return_once(move |_| {
                Ok(Some(DealRecord {
                    uuid: deal,
                    title: "Monsoon Sale".to_string(),
                    active: true,
                    expires_at: Timestamp::MAX,
                    product_uuids: vec![product],
                    created_at: Timestamp::UNIX_EPOCH,
                }))
            });

        let response: StoreResponse = TestClient::get("http://example.com/store")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 1);
        assert_eq!(response.categories.len(), 1);

        let live = response.deal.ok_or("expected a live deal")?;

        assert_eq!(live.uuid, deal.into_uuid());
        assert_eq!(live.product_uuids, vec![product.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_store_forwards_category_filter() -> TestResult {
        let category = CategoryUuid::new();
        let mut mocks = MockServices::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .withf(move |filter| *filter == Some(category))
            .return_once(|_| Ok(vec![]));

        mocks
            .catalog
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![]));

        mocks
            .catalog
            .expect_get_active_deal()
            .once()
            .return_once(|_| Ok(None));

        let response: StoreResponse =
            TestClient::get(format!("http://example.com/store?category={category}"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert!(response.products.is_empty());
        assert!(response.deal.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_store_storage_error_returns_500() -> TestResult {
        let mut mocks = MockServices::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .return_once(|_| Err(CatalogServiceError::Sql(sqlx_pool_closed())));

        let res = TestClient::get("http://example.com/store")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
