use clap::Args;
use storefront::orders::FulfillmentStatus;
use storefront_app::domain::orders::{OrdersService, records::OrderUuid};
use uuid::Uuid;

use super::{orders_service, print_order};
use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Order to update
    #[arg(long)]
    order_uuid: Uuid,

    /// New fulfillment status (confirmed, shipped, delivered, cancelled, returned)
    #[arg(long)]
    status: FulfillmentStatus,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let order = orders_service(&args.database)
        .await?
        .update_status(OrderUuid::from_uuid(args.order_uuid), args.status)
        .await
        .map_err(|error| format!("failed to update order status: {error}"))?;

    print_order(&order);

    Ok(())
}
