//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::orders::{FulfillmentStatus, PaymentMethod, PaymentStatus, StatusAxis};
use uuid::Uuid;

use crate::{
    database::{to_i32, try_get_u32},
    domain::{
        catalog::records::ProductUuid,
        customers::records::CustomerUuid,
        orders::{
            data::{BillingDetails, ShippingDetails},
            records::{
                OrderLineRecord, OrderLineUuid, OrderRecord, OrderReturnRecord, OrderReturnUuid,
                OrderStatusEventRecord, OrderStatusEventUuid, OrderUuid,
            },
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_FULFILLMENT_STATUS_SQL: &str = include_str!("sql/update_fulfillment_status.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("sql/update_payment_status.sql");
const SET_GATEWAY_ORDER_ID_SQL: &str = include_str!("sql/set_gateway_order_id.sql");
const CREATE_ORDER_LINES_SQL: &str = include_str!("sql/create_order_lines.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const APPEND_STATUS_EVENT_SQL: &str = include_str!("sql/append_status_event.sql");
const LIST_STATUS_EVENTS_SQL: &str = include_str!("sql/list_status_events.sql");
const CREATE_ORDER_RETURN_SQL: &str = include_str!("sql/create_order_return.sql");

/// Header of an order about to be inserted.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub billing: BillingDetails,
    pub shipping: ShippingDetails,
    pub total: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethod,
}

/// A cart line frozen into an order line.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        let NewOrder {
            uuid,
            customer_uuid,
            billing,
            shipping,
            total,
            currency,
            payment_method,
        } = order;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(customer_uuid.into_uuid())
            .bind(billing.first_name)
            .bind(billing.last_name)
            .bind(billing.email)
            .bind(billing.address)
            .bind(billing.city)
            .bind(billing.country)
            .bind(billing.zip_code)
            .bind(billing.phone)
            .bind(shipping.address)
            .bind(shipping.city)
            .bind(shipping.country)
            .bind(shipping.zip_code)
            .bind(shipping.phone)
            .bind(total)
            .bind(currency)
            .bind(payment_method.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert all lines of an order in one statement, keeping their order.
    pub(crate) async fn create_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        let mut uuids = Vec::with_capacity(lines.len());
        let mut positions = Vec::with_capacity(lines.len());
        let mut products = Vec::with_capacity(lines.len());
        let mut names = Vec::with_capacity(lines.len());
        let mut quantities = Vec::with_capacity(lines.len());
        let mut prices = Vec::with_capacity(lines.len());

        for (idx, line) in lines.into_iter().enumerate() {
            let position = u32::try_from(idx).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            uuids.push(Uuid::now_v7());
            positions.push(to_i32(position, "position")?);
            products.push(line.product_uuid.into_uuid());
            names.push(line.product_name);
            quantities.push(to_i32(line.quantity, "quantity")?);
            prices.push(line.unit_price);
        }

        let mut created = query_as::<Postgres, OrderLineRecord>(CREATE_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(positions)
            .bind(products)
            .bind(names)
            .bind(quantities)
            .bind(prices)
            .fetch_all(&mut **tx)
            .await?;

        created.sort_by_key(|line| line.position);

        Ok(created)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch the order and lock its row until `tx` ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lines of every given order, grouped by order and in cart order within each.
    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_fulfillment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: FulfillmentStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_FULFILLMENT_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Set the payment status, and the gateway payment id when one is given.
    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: PaymentStatus,
        gateway_payment_id: Option<&str>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_PAYMENT_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(gateway_payment_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_gateway_order_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        gateway_order_id: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_GATEWAY_ORDER_ID_SQL)
            .bind(order.into_uuid())
            .bind(gateway_order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn append_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        axis: StatusAxis,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        query(APPEND_STATUS_EVENT_SQL)
            .bind(OrderStatusEventUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(axis.as_str())
            .bind(status)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderStatusEventRecord>, sqlx::Error> {
        query_as::<Postgres, OrderStatusEventRecord>(LIST_STATUS_EVENTS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        reason: &str,
    ) -> Result<OrderReturnRecord, sqlx::Error> {
        query_as::<Postgres, OrderReturnRecord>(CREATE_ORDER_RETURN_SQL)
            .bind(OrderReturnUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(reason)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Decode a text column through its `FromStr` impl.
fn try_parse<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            billing: BillingDetails {
                first_name: row.try_get("billing_first_name")?,
                last_name: row.try_get("billing_last_name")?,
                email: row.try_get("billing_email")?,
                address: row.try_get("billing_address")?,
                city: row.try_get("billing_city")?,
                country: row.try_get("billing_country")?,
                zip_code: row.try_get("billing_zip_code")?,
                phone: row.try_get("billing_phone")?,
            },
            shipping: ShippingDetails {
                address: row.try_get("shipping_address")?,
                city: row.try_get("shipping_city")?,
                country: row.try_get("shipping_country")?,
                zip_code: row.try_get("shipping_zip_code")?,
                phone: row.try_get("shipping_phone")?,
            },
            total: row.try_get::<Decimal, _>("total")?,
            currency: row.try_get("currency")?,
            payment_method: try_parse(row, "payment_method")?,
            payment_status: try_parse(row, "payment_status")?,
            fulfillment_status: try_parse(row, "fulfillment_status")?,
            gateway_order_id: row.try_get("gateway_order_id")?,
            gateway_payment_id: row.try_get("gateway_payment_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            position: try_get_u32(row, "position")?,
            product_uuid: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            product_name: row.try_get("product_name")?,
            quantity: try_get_u32(row, "quantity")?,
            unit_price: row.try_get::<Decimal, _>("unit_price")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderStatusEventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderStatusEventUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            axis: try_parse(row, "axis")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderReturnRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderReturnUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            reason: row.try_get("reason")?,
            approved: row.try_get("approved")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
