//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::wishlists::WishlistsServiceError;

pub(crate) fn into_status_error(error: WishlistsServiceError) -> StatusError {
    match error {
        WishlistsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        WishlistsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid wishlist request")
        }
        WishlistsServiceError::Cart(cart) => crate::carts::errors::into_status_error(cart),
        WishlistsServiceError::Sql(source) => {
            error!("wishlist query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
