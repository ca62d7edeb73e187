//! API Token Records

use std::fmt;

use jiff::Timestamp;

use crate::{domain::customers::records::CustomerUuid, uuids::TypedUuid};

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiTokenRecord>;

/// Stored API token. The digest never leaves the repository.
#[derive(Debug, Clone)]
pub struct ApiTokenRecord {
    pub uuid: ApiTokenUuid,
    pub customer_uuid: CustomerUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

impl ApiTokenRecord {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// A freshly issued token. `token` is the only copy of the secret.
#[derive(Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub record: ApiTokenRecord,
}

impl fmt::Debug for IssuedApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedApiToken")
            .field("token", &"<redacted>")
            .field("record", &self.record)
            .finish()
    }
}
