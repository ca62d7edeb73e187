//! Storefront
//!
//! Storefront domain rules: product pricing, cart limits and snapshots, order status
//! state machines and invoice documents. Nothing in this crate performs I/O beyond
//! writing rendered documents to a caller supplied writer.

pub mod carts;
pub mod invoice;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
