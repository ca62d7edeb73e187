use clap::Args;
use storefront_app::domain::orders::{OrdersService, records::OrderUuid};
use uuid::Uuid;

use super::{orders_service, print_order};
use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RefundArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Paid order to refund
    #[arg(long)]
    order_uuid: Uuid,
}

pub(crate) async fn run(args: RefundArgs) -> Result<(), String> {
    let order = orders_service(&args.database)
        .await?
        .refund_payment(OrderUuid::from_uuid(args.order_uuid))
        .await
        .map_err(|error| format!("failed to refund order: {error}"))?;

    print_order(&order);

    Ok(())
}
