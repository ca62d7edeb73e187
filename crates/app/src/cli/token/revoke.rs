use clap::Args;
use storefront_app::auth::{PgAuthService, records::ApiTokenUuid};
use uuid::Uuid;

use crate::cli::args::{DatabaseArgs, find_customer};

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    target: RevokeTarget,
}

/// One token, or every token of a customer.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct RevokeTarget {
    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Option<Uuid>,

    /// Sign out the customer with this email everywhere
    #[arg(long)]
    email: Option<String>,

    /// Sign out the customer with this UUID everywhere
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let target = args.target;

    if let Some(token) = target.token_uuid {
        let revoked = PgAuthService::new(pool)
            .revoke_api_token(ApiTokenUuid::from_uuid(token))
            .await
            .map_err(|error| format!("failed to revoke token: {error}"))?;

        if revoked {
            println!("revoked token {token}");
        } else {
            println!("token {token} was not active");
        }

        return Ok(());
    }

    let customer = find_customer(&pool, target.email.as_deref(), target.customer_uuid).await?;

    let revoked = PgAuthService::new(pool)
        .revoke_customer_tokens(customer.uuid)
        .await
        .map_err(|error| format!("failed to revoke tokens: {error}"))?;

    println!("revoked {revoked} active token(s) of {}", customer.email);

    Ok(())
}
