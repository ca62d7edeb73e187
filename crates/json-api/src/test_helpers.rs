//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::INR;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    carts::CartLimits,
    orders::{FulfillmentStatus, PaymentMethod, PaymentStatus},
};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{MockCartsService, records::CartLineRecord},
        catalog::{
            MockCatalogService,
            records::{ProductRecord, ProductUuid},
        },
        customers::records::CustomerUuid,
        orders::{
            MockOrdersService,
            data::{BillingDetails, ShippingDetails},
            records::{OrderDetails, OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid},
        },
        wishlists::MockWishlistsService,
    },
    health::MockHealthService,
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_CART_LIMITS: CartLimits = CartLimits {
    max_quantity_per_item: 10,
    max_total_amount: Decimal::from_parts(200_000, 0, 0, false, 0),
};

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. A mock without expectations fails the test when called.
#[derive(Default)]
pub(crate) struct MockServices {
    pub catalog: MockCatalogService,
    pub carts: MockCartsService,
    pub wishlists: MockWishlistsService,
    pub orders: MockOrdersService,
    pub auth: MockAuthService,
    pub health: MockHealthService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                catalog: Arc::new(self.catalog),
                carts: Arc::new(self.carts),
                wishlists: Arc::new(self.wishlists),
                orders: Arc::new(self.orders),
                auth: Arc::new(self.auth),
                health: Arc::new(self.health),
            },
            TEST_CART_LIMITS,
            INR,
        )
    }

    /// Serve `route` as the authenticated test customer.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

pub(crate) fn sqlx_pool_closed() -> sqlx::Error {
    sqlx::Error::PoolClosed
}

pub(crate) fn dec(value: &str) -> Decimal {
    value.parse().unwrap_or_default()
}

pub(crate) fn make_product(uuid: ProductUuid, price: &str, mrp: Option<&str>) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Kettle".to_string(),
        description: "Electric kettle".to_string(),
        price: dec(price),
        mrp: mrp.map(dec),
        stock: 10,
        category_uuid: None,
        brand_uuid: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_line(product: ProductUuid, quantity: u32) -> CartLineRecord {
    CartLineRecord {
        customer_uuid: TEST_CUSTOMER_UUID,
        product_uuid: product,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, fulfillment_status: FulfillmentStatus) -> OrderDetails {
    let billing = BillingDetails {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.com".to_string(),
        address: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        country: "India".to_string(),
        zip_code: "560001".to_string(),
        phone: "9800000000".to_string(),
    };

    OrderDetails {
        order: OrderRecord {
            uuid,
            customer_uuid: TEST_CUSTOMER_UUID,
            shipping: ShippingDetails::default().or_billing(&billing),
            billing,
            total: dec("201.00"),
            currency: "INR".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
            payment_status: PaymentStatus::Pending,
            fulfillment_status,
            gateway_order_id: None,
            gateway_payment_id: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        lines: vec![OrderLineRecord {
            uuid: OrderLineUuid::new(),
            order_uuid: uuid,
            position: 0,
            product_uuid: Some(ProductUuid::new()),
            product_name: "Kettle".to_string(),
            quantity: 2,
            unit_price: dec("100.50"),
        }],
    }
}
