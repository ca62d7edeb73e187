//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::BearerTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, revoked or mismatched token. Callers must not tell these apart.
    #[error("token not found")]
    NotFound,

    #[error("token belongs to an unknown customer")]
    UnknownCustomer,

    #[error("malformed bearer token")]
    Malformed(#[from] BearerTokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::UnknownCustomer,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
