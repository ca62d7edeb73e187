//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, BearerToken,
        records::{ApiTokenRecord, ApiTokenUuid, IssuedApiToken},
        repository::PgAuthRepository,
    },
    domain::customers::records::CustomerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a token for `customer`. The returned token is the only copy of its secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownCustomer`] when the customer does not exist.
    #[tracing::instrument(name = "auth.service.issue_api_token", skip_all, fields(customer_uuid = %customer), err)]
    pub async fn issue_api_token(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = BearerToken::generate();

        let record = self
            .repository
            .create_api_token(token.uuid(), customer, &token.digest())
            .await?;

        info!(token_uuid = %record.uuid, "issued api token");

        Ok(IssuedApiToken {
            token: token.expose(),
            record,
        })
    }

    /// Tokens of `customer`, active ones first, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ApiTokenRecord>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(customer).await?)
    }

    /// Revoke one token. Returns `false` when it was already revoked or never existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let revoked = self.repository.revoke_api_token(token).await?;

        if let Some(record) = &revoked {
            info!(token_uuid = %record.uuid, customer_uuid = %record.customer_uuid, "revoked api token");
        }

        Ok(revoked.is_some())
    }

    /// Revoke every active token of `customer`, returning how many were active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_customer_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<u64, AuthServiceError> {
        let revoked = self.repository.revoke_customer_api_tokens(customer).await?;

        info!(customer_uuid = %customer, revoked, "revoked customer api tokens");

        Ok(revoked)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError> {
        let token = BearerToken::parse(bearer_token)?;

        let customer = self
            .repository
            .authenticate_api_token(token.uuid(), &token.digest())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        debug!(token_uuid = %token.uuid(), customer_uuid = %customer, "bearer token accepted");

        Ok(customer)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the customer it was issued for, recording its use.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError>;
}
