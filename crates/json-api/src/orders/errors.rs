//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        OrdersServiceError::TermsNotAccepted => {
            StatusError::bad_request().brief("Terms and conditions must be accepted")
        }
        OrdersServiceError::InvalidTransition(transition) => {
            StatusError::conflict().brief(transition.to_string())
        }
        OrdersServiceError::PaymentReferenceMismatch => {
            StatusError::conflict().brief("Payment does not belong to this order")
        }
        OrdersServiceError::InvalidSignature => {
            StatusError::conflict().brief("Payment signature is missing or invalid")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order"),
        OrdersServiceError::Money(source) => {
            error!("order amount conversion failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
