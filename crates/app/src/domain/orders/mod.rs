//! Orders
//!
//! Checkout turns a cart into an immutable order. After placement only the two status
//! axes and the gateway references change, and every status change is recorded as an
//! event in the same transaction.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
