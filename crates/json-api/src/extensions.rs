//! Handler extensions: depot access and error mapping.

use std::{any::Any, fmt::Display};

use salvo::prelude::{Depot, StatusError};
use storefront_app::domain::customers::records::CustomerUuid;
use tracing::error;

const CUSTOMER_UUID_KEY: &str = "customer_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_KEY, customer);
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

/// Failures the customer can do nothing about, such as rendering an invoice or setting a
/// header, become a logged 500.
pub(crate) trait ResultExt<T> {
    fn or_500(self, what: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, what: &'static str) -> Result<T, StatusError> {
        self.map_err(|cause| {
            error!(%cause, "{what}");

            StatusError::internal_server_error()
        })
    }
}
