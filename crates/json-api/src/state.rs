//! Shared handler state.

use std::sync::Arc;

use rusty_money::iso::Currency;
use storefront::carts::CartLimits;
use storefront_app::context::AppContext;

/// Services plus the store settings handlers echo back to clients.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Same limits the carts service enforces.
    pub(crate) cart_limits: CartLimits,

    /// Store currency; every price and total is in it.
    pub(crate) currency: &'static Currency,
}

impl State {
    #[must_use]
    pub(crate) fn shared(
        app: AppContext,
        cart_limits: CartLimits,
        currency: &'static Currency,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            cart_limits,
            currency,
        })
    }

    /// ISO 4217 code of the store currency.
    #[must_use]
    pub(crate) fn currency_code(&self) -> &'static str {
        self.currency.iso_alpha_code
    }
}
