//! Bearer token format.
//!
//! A token reads `sf_v1_{token uuid}.{secret}`: the uuid is the row key, the secret is 32
//! random bytes in lowercase hex.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::auth::records::ApiTokenUuid;

const PREFIX: &str = "sf_v1_";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("token does not start with `{PREFIX}`")]
    UnknownPrefix,

    #[error("token id is not a uuid")]
    InvalidId,

    #[error("token secret must be {SECRET_BYTES} hex encoded bytes")]
    InvalidSecret,
}

/// A customer bearer token. The secret is wiped when the token is dropped.
pub struct BearerToken {
    uuid: ApiTokenUuid,
    secret: Zeroizing<[u8; SECRET_BYTES]>,
}

impl BearerToken {
    /// New token with a secret drawn from the operating system's generator.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = Zeroizing::new([0_u8; SECRET_BYTES]);

        OsRng.fill_bytes(secret.as_mut_slice());

        Self {
            uuid: ApiTokenUuid::new(),
            secret,
        }
    }

    /// Parse the wire form presented in an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns a [`BearerTokenError`] naming the first malformed part.
    pub fn parse(raw: &str) -> Result<Self, BearerTokenError> {
        let rest = raw
            .strip_prefix(PREFIX)
            .ok_or(BearerTokenError::UnknownPrefix)?;

        let (id, secret_hex) = rest
            .split_once('.')
            .ok_or(BearerTokenError::InvalidSecret)?;

        let uuid = Uuid::try_parse(id).map_err(|_ignored| BearerTokenError::InvalidId)?;

        let mut secret = Zeroizing::new([0_u8; SECRET_BYTES]);

        hex::decode_to_slice(secret_hex, secret.as_mut_slice())
            .map_err(|_ignored| BearerTokenError::InvalidSecret)?;

        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(uuid),
            secret,
        })
    }

    #[must_use]
    pub fn uuid(&self) -> ApiTokenUuid {
        self.uuid
    }

    /// Hex SHA-256 over the token id and secret, the only form that is stored.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.uuid.into_uuid().as_bytes());
        hasher.update(self.secret.as_slice());

        hex::encode(hasher.finalize())
    }

    /// Wire form, handed to the customer exactly once.
    #[must_use]
    pub fn expose(&self) -> String {
        format!(
            "{PREFIX}{}.{}",
            self.uuid.into_uuid().simple(),
            hex::encode(self.secret.as_slice())
        )
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("uuid", &self.uuid)
            .field("secret", &"<redacted>")
            .finish()
    }
}
