//! Test Helpers

use rust_decimal::Decimal;
use storefront::orders::PaymentMethod;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError},
        catalog::{
            CatalogService, CatalogServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        orders::data::{BillingDetails, PlaceOrder, ShippingDetails},
    },
    test::TestContext,
};

/// Parse a decimal literal.
///
/// # Panics
///
/// Panics if `value` is not a decimal.
pub(crate) fn dec(value: &str) -> Decimal {
    value.parse().expect("invalid decimal literal")
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: &str,
) -> Result<ProductRecord, CatalogServiceError> {
    insert_product(ctx, name, dec(price), None).await
}

pub(crate) async fn create_product_with_mrp(
    ctx: &TestContext,
    name: &str,
    price: &str,
    mrp: &str,
) -> Result<ProductRecord, CatalogServiceError> {
    insert_product(ctx, name, dec(price), Some(dec(mrp))).await
}

async fn insert_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    mrp: Option<Decimal>,
) -> Result<ProductRecord, CatalogServiceError> {
    ctx.catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price,
            mrp,
            stock: 100,
            category_uuid: None,
            brand_uuid: None,
        })
        .await
}

/// Add `quantity` units of `product` to the default customer's cart.
pub(crate) async fn fill_cart(
    ctx: &TestContext,
    product: &ProductRecord,
    quantity: u32,
) -> Result<(), CartsServiceError> {
    for _ in 0..quantity {
        ctx.carts.add_item(ctx.customer_uuid, product.uuid).await?;
    }

    Ok(())
}

/// Checkout form with complete billing details and blank shipping.
pub(crate) fn place_order_form(payment_method: PaymentMethod) -> PlaceOrder {
    PlaceOrder {
        billing: BillingDetails {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            country: "India".to_string(),
            zip_code: "560001".to_string(),
            phone: "9800000000".to_string(),
        },
        shipping: ShippingDetails::default(),
        payment_method,
        accepted_terms: true,
    }
}
