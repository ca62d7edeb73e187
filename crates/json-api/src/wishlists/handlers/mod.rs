//! Wishlist Handlers

pub(crate) mod add;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod move_to_cart;
