//! Cart Errors

use salvo::http::StatusError;
use tracing::{debug, error};

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Product not found in catalog or cart")
        }
        CartsServiceError::Limit(limit) => {
            debug!("cart change rejected: {limit}");

            StatusError::conflict().brief(limit.to_string())
        }
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart line already exists")
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart request"),
        CartsServiceError::Sql(source) => {
            error!("cart query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
