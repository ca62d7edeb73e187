//! Payments Config

use std::sync::Arc;

use clap::Args;
use rusty_money::iso::Currency;
use storefront::money::{self, MoneyConversionError};
use storefront_app::payments::{DisabledGateway, PaymentGateway, RazorpayClient, RazorpayConfig};
use tracing::warn;

/// Currency and payment gateway settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// ISO 4217 code of the store currency
    #[arg(long, env = "CURRENCY", default_value = "INR")]
    pub currency: String,

    /// Razorpay API base URL
    #[arg(long, env = "RAZORPAY_API_URL", default_value = "https://api.razorpay.com")]
    pub razorpay_api_url: String,

    /// Razorpay key id
    #[arg(long, env = "RAZORPAY_KEY_ID")]
    pub razorpay_key_id: Option<String>,

    /// Razorpay key secret
    #[arg(long, env = "RAZORPAY_KEY_SECRET", hide_env_values = true)]
    pub razorpay_key_secret: Option<String>,
}

impl PaymentsConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error when the code is not an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, MoneyConversionError> {
        money::currency(&self.currency)
    }

    /// Razorpay when both credentials are present, otherwise a gateway that refuses charges.
    #[must_use]
    pub fn gateway(&self) -> Arc<dyn PaymentGateway> {
        match (&self.razorpay_key_id, &self.razorpay_key_secret) {
            (Some(key_id), Some(key_secret)) => Arc::new(RazorpayClient::new(RazorpayConfig {
                api_url: self.razorpay_api_url.clone(),
                key_id: key_id.clone(),
                key_secret: key_secret.clone(),
            })),
            _ => {
                warn!("razorpay credentials not configured; online payments will fail");

                Arc::new(DisabledGateway)
            }
        }
    }
}
