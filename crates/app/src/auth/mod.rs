//! Customer API tokens
//!
//! Customers authenticate with bearer tokens issued from the admin CLI. Only a SHA-256 digest
//! of each token is stored, so a leaked table cannot be replayed against the API.

pub mod bearer;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use bearer::{BearerToken, BearerTokenError};
pub use errors::AuthServiceError;
pub use service::*;
