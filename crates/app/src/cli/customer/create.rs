use clap::Args;
use storefront_app::{
    auth::PgAuthService,
    domain::customers::{
        CustomersService, PgCustomersService, data::NewCustomer, records::CustomerUuid,
    },
};
use uuid::Uuid;

use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// Customer display name
    #[arg(long)]
    name: String,

    /// Customer email address
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseArgs,

    /// Optional customer UUID; generated when omitted
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = args.database.connect().await?;

    let customer_uuid = args
        .customer_uuid
        .map_or_else(CustomerUuid::new, CustomerUuid::from_uuid);

    let customer = PgCustomersService::new(pool.clone())
        .create_customer(NewCustomer {
            uuid: customer_uuid,
            name: args.name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(customer.uuid)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_name: {}", customer.name);
    println!("customer_email: {}", customer.email);
    println!("token_uuid: {}", issued.record.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
