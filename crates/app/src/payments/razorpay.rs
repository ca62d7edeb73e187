//! Razorpay orders API client.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::Sha256;
use tracing::debug;

use super::{ChargeRequest, GatewayError, GatewayOrder, PaymentGateway};

type HmacSha256 = Hmac<Sha256>;

/// Configuration for connecting to Razorpay.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// API base address, e.g. `"https://api.razorpay.com"`.
    pub api_url: String,

    /// Key id, used as the basic auth user.
    pub key_id: String,

    /// Key secret, used as the basic auth password and to sign payments.
    pub key_secret: String,
}

/// HTTP client for the Razorpay orders API.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    config: RazorpayConfig,
    http: Client,
}

impl RazorpayClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.config.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_charge(&self, charge: ChargeRequest) -> Result<GatewayOrder, GatewayError> {
        let response = self
            .http
            .post(self.orders_url())
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&order_body(&charge))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedResponse(format!(
                "create order failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        debug!(receipt = %charge.receipt, gateway_order_id = %parsed.id, "gateway order created");

        Ok(GatewayOrder { id: parsed.id })
    }

    fn verify_payment(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> Result<(), GatewayError> {
        let expected =
            hex::decode(signature.trim()).map_err(|_ignored| GatewayError::InvalidSignature)?;

        payment_mac(&self.config.key_secret, gateway_order_id, gateway_payment_id)?
            .verify_slice(&expected)
            .map_err(|_ignored| GatewayError::InvalidSignature)
    }
}

/// HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed with the key secret.
fn payment_mac(
    key_secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
) -> Result<HmacSha256, GatewayError> {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes())
        .map_err(|_ignored| GatewayError::NotConfigured)?;

    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());

    Ok(mac)
}

/// Body of `POST /v1/orders`.
fn order_body(charge: &ChargeRequest) -> Value {
    json!({
        "amount": charge.amount_minor,
        "currency": charge.currency,
        "receipt": charge.receipt,
        "payment_capture": u8::from(charge.capture_immediately),
    })
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}
