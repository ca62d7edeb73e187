//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use sqlx::{Postgres, Transaction};
use storefront::{
    invoice::{Invoice, InvoiceAddress, InvoiceLine},
    money,
    orders::{FulfillmentStatus, PaymentStatus, StatusAxis},
};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{records::CartSnapshot, repository::PgCartsRepository},
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            data::{PaymentConfirmation, PlaceOrder},
            errors::OrdersServiceError,
            records::{
                OrderDetails, OrderLineRecord, OrderRecord, OrderReturnRecord,
                OrderStatusEventRecord, OrderUuid, PaymentOutcome, PlacedOrder,
            },
            repository::{NewOrder, NewOrderLine, PgOrdersRepository},
        },
    },
    payments::{ChargeRequest, PaymentGateway},
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts: PgCartsRepository,
    customers: PgCustomersRepository,
    gateway: Arc<dyn PaymentGateway>,
    currency: &'static Currency,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>, currency: &'static Currency) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts: PgCartsRepository::new(),
            customers: PgCustomersRepository::new(),
            gateway,
            currency,
        }
    }

    /// Create the gateway charge for a committed order and remember its reference.
    ///
    /// Gateway failures leave the order unpaid and are reported in the outcome.
    async fn initiate_payment(
        &self,
        customer: CustomerUuid,
        order: &mut OrderRecord,
        amount_minor: i64,
    ) -> Result<PaymentOutcome, OrdersServiceError> {
        let charge = ChargeRequest {
            amount_minor,
            currency: order.currency.clone(),
            receipt: order.uuid.to_string(),
            capture_immediately: true,
        };

        let gateway_order = match self.gateway.create_charge(charge).await {
            Ok(gateway_order) => gateway_order,
            Err(error) => {
                warn!(order_uuid = %order.uuid, %error, "payment gateway charge failed");

                return Ok(PaymentOutcome::Failed {
                    reason: error.to_string(),
                });
            }
        };

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        *order = self
            .repository
            .set_gateway_order_id(&mut tx, order.uuid, &gateway_order.id)
            .await?;

        tx.commit().await?;

        Ok(PaymentOutcome::Initiated {
            gateway_order_id: gateway_order.id,
        })
    }

    async fn change_fulfillment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        next: FulfillmentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let current = self.repository.lock_order(tx, order).await?;
        let next = current.fulfillment_status.transition_to(next)?;

        let updated = self
            .repository
            .update_fulfillment_status(tx, order, next)
            .await?;

        self.repository
            .append_event(tx, order, StatusAxis::Fulfillment, next.as_str())
            .await?;

        Ok(updated)
    }

    async fn change_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        current: &OrderRecord,
        next: PaymentStatus,
        gateway_payment_id: Option<&str>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let next = current.payment_status.transition_to(next)?;

        let updated = self
            .repository
            .update_payment_status(tx, current.uuid, next, gateway_payment_id)
            .await?;

        self.repository
            .append_event(tx, current.uuid, StatusAxis::Payment, next.as_str())
            .await?;

        Ok(updated)
    }

    async fn load_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let order = self.repository.get_order(tx, order).await?;
        let lines = self.repository.list_lines(tx, &[order.uuid]).await?;

        Ok(OrderDetails { order, lines })
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip_all,
        fields(
            customer_uuid = %customer,
            payment_method = %order.payment_method,
            order_uuid = tracing::field::Empty,
            line_count = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: PlaceOrder,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        if !order.accepted_terms {
            return Err(OrdersServiceError::TermsNotAccepted);
        }

        let PlaceOrder {
            billing,
            shipping,
            payment_method,
            ..
        } = order;

        let shipping = shipping.or_billing(&billing);

        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.customers.lock_customer(&mut tx, customer).await?;

        let snapshot = CartSnapshot::new(self.carts.list_items(&mut tx, customer).await?);

        if snapshot.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total = snapshot.total();

        let amount_minor = if payment_method.requires_gateway() {
            Some(money::to_minor_units(total, self.currency)?)
        } else {
            None
        };

        let uuid = OrderUuid::new();

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(uuid));
        span.record("line_count", snapshot.len());

        let mut record = self
            .repository
            .create_order(
                &mut tx,
                NewOrder {
                    uuid,
                    customer_uuid: customer,
                    billing,
                    shipping,
                    total,
                    currency: self.currency.iso_alpha_code.to_string(),
                    payment_method,
                },
            )
            .await?;

        let lines = snapshot
            .into_lines()
            .into_iter()
            .map(|line| NewOrderLine {
                unit_price: line.unit_price,
                product_uuid: line.line.product_uuid,
                product_name: line.line.product_name,
                quantity: line.line.quantity,
            })
            .collect();

        let lines = self.repository.create_lines(&mut tx, uuid, lines).await?;

        self.carts.clear(&mut tx, customer).await?;

        self.repository
            .append_event(
                &mut tx,
                uuid,
                StatusAxis::Fulfillment,
                record.fulfillment_status.as_str(),
            )
            .await?;

        self.repository
            .append_event(
                &mut tx,
                uuid,
                StatusAxis::Payment,
                record.payment_status.as_str(),
            )
            .await?;

        tx.commit().await?;

        info!(order_uuid = %uuid, %total, "placed order");

        let payment = match amount_minor {
            Some(amount_minor) => {
                self.initiate_payment(customer, &mut record, amount_minor)
                    .await?
            }
            None => PaymentOutcome::NotRequired,
        };

        Ok(PlacedOrder {
            order: OrderDetails {
                order: record,
                lines,
            },
            payment,
        })
    }

    #[tracing::instrument(
        name = "orders.service.confirm_payment",
        skip_all,
        fields(
            customer_uuid = %customer,
            order_uuid = %order,
            succeeded = confirmation.succeeded
        ),
        err
    )]
    async fn confirm_payment(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        confirmation: PaymentConfirmation,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if current.gateway_order_id.as_deref() != Some(confirmation.gateway_order_id.as_str()) {
            return Err(OrdersServiceError::PaymentReferenceMismatch);
        }

        if confirmation.succeeded {
            let signature = confirmation
                .signature
                .as_deref()
                .ok_or(OrdersServiceError::InvalidSignature)?;

            if let Err(error) = self.gateway.verify_payment(
                &confirmation.gateway_order_id,
                &confirmation.gateway_payment_id,
                signature,
            ) {
                warn!(order_uuid = %order, error = %error, "payment signature rejected");

                return Err(OrdersServiceError::InvalidSignature);
            }
        }

        let next = if confirmation.succeeded {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Failed
        };

        let updated = self
            .change_payment(
                &mut tx,
                &current,
                next,
                Some(confirmation.gateway_payment_id.as_str()),
            )
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order, payment_status = %updated.payment_status, "payment confirmed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip_all,
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: FulfillmentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_operator_transaction().await?;

        let updated = self.change_fulfillment(&mut tx, order, status).await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip_all,
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let updated = self
            .change_fulfillment(&mut tx, order, FulfillmentStatus::Cancelled)
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order, "cancelled order");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.request_return",
        skip_all,
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn request_return(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderReturnRecord, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.change_fulfillment(&mut tx, order, FulfillmentStatus::Returned)
            .await?;

        let record = self.repository.create_return(&mut tx, order, &reason).await?;

        tx.commit().await?;

        info!(order_uuid = %order, "return requested");

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.refund_payment",
        skip_all,
        fields(order_uuid = %order),
        err
    )]
    async fn refund_payment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_operator_transaction().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        let updated = self
            .change_payment(&mut tx, &current, PaymentStatus::Refunded, None)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderDetails>, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let orders = self.repository.list_orders(&mut tx, customer).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let lines = self.repository.list_lines(&mut tx, &uuids).await?;

        tx.commit().await?;

        let mut lines_by_order: FxHashMap<OrderUuid, Vec<OrderLineRecord>> =
            FxHashMap::default();

        for line in lines {
            lines_by_order.entry(line.order_uuid).or_default().push(line);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderDetails {
                lines: lines_by_order.remove(&order.uuid).unwrap_or_default(),
                order,
            })
            .collect())
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        let details = self.load_details(&mut tx, order).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn order_events(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderStatusEventRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_customer_transaction(customer).await?;

        self.repository.get_order(&mut tx, order).await?;

        let events = self.repository.list_events(&mut tx, order).await?;

        tx.commit().await?;

        Ok(events)
    }

    async fn invoice(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Invoice, OrdersServiceError> {
        let OrderDetails { order, lines } = self.get_order(customer, order).await?;

        let currency = money::currency(&order.currency)?;
        let name = order.billing.full_name();

        let shipping = InvoiceAddress {
            name: name.clone(),
            email: order.billing.email.clone(),
            phone: order.shipping.phone,
            address: order.shipping.address,
            city: order.shipping.city,
            country: order.shipping.country,
            zip_code: order.shipping.zip_code,
        };

        let billing = InvoiceAddress {
            name,
            email: order.billing.email,
            phone: order.billing.phone,
            address: order.billing.address,
            city: order.billing.city,
            country: order.billing.country,
            zip_code: order.billing.zip_code,
        };

        Ok(Invoice {
            number: order.uuid.to_string(),
            issued_at: order.created_at,
            currency,
            billing,
            shipping,
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            lines: lines
                .into_iter()
                .map(|line| InvoiceLine {
                    description: line.product_name,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's cart into an order.
    ///
    /// The order, its lines, the emptied cart and the initial status events commit
    /// together. Online orders then create a gateway charge; a gateway failure is
    /// reported in [`PlacedOrder::payment`] and leaves the order unpaid.
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: PlaceOrder,
    ) -> Result<PlacedOrder, OrdersServiceError>;

    /// Apply the gateway's payment result to an order.
    async fn confirm_payment(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        confirmation: PaymentConfirmation,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Operator fulfillment change for any customer's order.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: FulfillmentStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Customer cancellation, possible until the order is delivered.
    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Return a delivered order. The return awaits approval.
    async fn request_return(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        reason: String,
    ) -> Result<OrderReturnRecord, OrdersServiceError>;

    /// Operator refund of a paid order.
    async fn refund_payment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// The customer's orders, newest first, each with its lines.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderDetails>, OrdersServiceError>;

    /// One of the customer's orders. Other customers' orders are `NotFound`.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Status history of an order, oldest first.
    async fn order_events(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderStatusEventRecord>, OrdersServiceError>;

    /// Invoice document for an order.
    async fn invoice(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Invoice, OrdersServiceError>;
}
