use clap::Args;
use jiff::Timestamp;
use storefront_app::auth::PgAuthService;

use crate::cli::args::{CustomerArgs, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    customer: CustomerArgs,

    /// Include revoked tokens
    #[arg(long)]
    all: bool,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let customer = args.customer.resolve(&pool).await?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(customer.uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    let shown: Vec<_> = tokens
        .iter()
        .filter(|token| args.all || token.is_active())
        .collect();

    if shown.is_empty() {
        println!("{} has no tokens", customer.email);

        return Ok(());
    }

    for token in shown {
        println!(
            "{}  issued {}  last used {}  {}",
            token.uuid,
            token.created_at,
            or_never(token.last_used_at),
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |at| format!("revoked {at}"))
        );
    }

    Ok(())
}

fn or_never(at: Option<Timestamp>) -> String {
    at.map_or_else(|| "never".to_string(), |at| at.to_string())
}
