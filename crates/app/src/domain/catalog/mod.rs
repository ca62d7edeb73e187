//! Catalog
//!
//! Products, categories, brands and promotional deals. The catalog is shared by every
//! customer, so none of its tables carry row-level security.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
