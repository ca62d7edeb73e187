//! Customer Data

use crate::domain::customers::records::CustomerUuid;

/// New Customer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    /// UUID to assign to the customer row.
    pub uuid: CustomerUuid,

    /// Display name.
    pub name: String,

    /// Contact email; unique across customers.
    pub email: String,
}
