use clap::Args;
use storefront_app::auth::PgAuthService;

use crate::cli::args::{CustomerArgs, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    customer: CustomerArgs,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;
    let customer = args.customer.resolve(&pool).await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(customer.uuid)
        .await
        .map_err(|error| format!("failed to issue token for {}: {error}", customer.email))?;

    println!("customer: {} <{}>", customer.name, customer.email);
    println!("token_uuid: {}", issued.record.uuid);
    println!("api_token: {}", issued.token);
    println!("the token is shown only once; hand it to the customer now");

    Ok(())
}
