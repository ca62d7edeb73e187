//! Catalog Handlers

pub(crate) mod get;
pub(crate) mod store;
