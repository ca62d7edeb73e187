//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod health;
pub mod payments;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
