use std::sync::Arc;

use clap::{Args, Subcommand};
use storefront_app::{
    database::Db,
    domain::orders::{PgOrdersService, records::OrderRecord},
    payments::DisabledGateway,
};

use crate::cli::args::DatabaseArgs;

mod refund;
mod set_status;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    SetStatus(set_status::SetStatusArgs),
    Refund(refund::RefundArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::SetStatus(args) => set_status::run(args).await,
        OrderSubcommand::Refund(args) => refund::run(args).await,
    }
}

/// Operator commands never create charges, so no gateway is wired in.
async fn orders_service(database: &DatabaseArgs) -> Result<PgOrdersService, String> {
    let pool = database.connect().await?;

    Ok(PgOrdersService::new(
        Db::new(pool),
        Arc::new(DisabledGateway),
        rusty_money::iso::INR,
    ))
}

fn print_order(order: &OrderRecord) {
    println!("order_uuid: {}", order.uuid);
    println!("customer_uuid: {}", order.customer_uuid);
    println!("fulfillment_status: {}", order.fulfillment_status);
    println!("payment_status: {}", order.payment_status);
    println!("total: {} {}", order.total, order.currency);
}
