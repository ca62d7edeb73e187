//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::orders::{FulfillmentStatus, PaymentMethod, PaymentStatus, StatusAxis};

use crate::{
    domain::{
        catalog::records::ProductUuid,
        customers::records::CustomerUuid,
        orders::data::{BillingDetails, ShippingDetails},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Status Event UUID
pub type OrderStatusEventUuid = TypedUuid<OrderStatusEventRecord>;

/// Order Return UUID
pub type OrderReturnUuid = TypedUuid<OrderReturnRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub billing: BillingDetails,
    pub shipping: ShippingDetails,
    pub total: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product as it was bought.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub position: u32,

    /// `None` once the product has been deleted from the catalog.
    pub product_uuid: Option<ProductUuid>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLineRecord {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order together with its lines, in cart order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub lines: Vec<OrderLineRecord>,
}

/// One entry of an order's status history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatusEventRecord {
    pub uuid: OrderStatusEventUuid,
    pub order_uuid: OrderUuid,
    pub axis: StatusAxis,
    pub status: String,
    pub created_at: Timestamp,
}

/// Return Request Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReturnRecord {
    pub uuid: OrderReturnUuid,
    pub order_uuid: OrderUuid,
    pub reason: String,
    pub approved: bool,
    pub created_at: Timestamp,
}

/// What happened to the payment while the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Cash on delivery.
    NotRequired,

    /// A gateway order was created; payment is awaited.
    Initiated { gateway_order_id: String },

    /// The gateway could not be reached or refused the charge. The order stays unpaid.
    Failed { reason: String },
}

impl PaymentOutcome {
    /// Stable lowercase name, as serialised.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequired => "not_required",
            Self::Initiated { .. } => "initiated",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: OrderDetails,
    pub payment: PaymentOutcome,
}
