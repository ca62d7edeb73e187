//! Order Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::data::{BillingDetails, ShippingDetails};

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod events;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod invoice;
pub(crate) mod invoice_typ;
pub(crate) mod payment;
pub(crate) mod returns;

/// Billing party, as submitted at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct BillingPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub phone: String,
}

impl From<BillingPayload> for BillingDetails {
    fn from(billing: BillingPayload) -> Self {
        BillingDetails {
            first_name: billing.first_name,
            last_name: billing.last_name,
            email: billing.email,
            address: billing.address,
            city: billing.city,
            country: billing.country,
            zip_code: billing.zip_code,
            phone: billing.phone,
        }
    }
}

impl From<BillingDetails> for BillingPayload {
    fn from(billing: BillingDetails) -> Self {
        BillingPayload {
            first_name: billing.first_name,
            last_name: billing.last_name,
            email: billing.email,
            address: billing.address,
            city: billing.city,
            country: billing.country,
            zip_code: billing.zip_code,
            phone: billing.phone,
        }
    }
}

/// Delivery address. Blank fields are taken from the billing details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ShippingPayload {
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub phone: String,
}

impl From<ShippingPayload> for ShippingDetails {
    fn from(shipping: ShippingPayload) -> Self {
        ShippingDetails {
            address: shipping.address,
            city: shipping.city,
            country: shipping.country,
            zip_code: shipping.zip_code,
            phone: shipping.phone,
        }
    }
}

impl From<ShippingDetails> for ShippingPayload {
    fn from(shipping: ShippingDetails) -> Self {
        ShippingPayload {
            address: shipping.address,
            city: shipping.city,
            country: shipping.country,
            zip_code: shipping.zip_code,
            phone: shipping.phone,
        }
    }
}
