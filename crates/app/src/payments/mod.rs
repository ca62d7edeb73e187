//! Payment gateway
//!
//! The order service hands a charge to a [`PaymentGateway`] once an online order has been
//! committed. Amounts always travel in minor units of the order currency. A successful payment
//! reported back by the browser is only trusted once [`PaymentGateway::verify_payment`] accepts
//! the signature the gateway issued for it.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod razorpay;

pub use razorpay::{RazorpayClient, RazorpayConfig};

/// A charge to create at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    /// Amount in minor units (paise for INR).
    pub amount_minor: i64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Merchant reference, the order id.
    pub receipt: String,

    /// Capture the payment as soon as it is authorised.
    pub capture_immediately: bool,
}

/// Gateway-side order created for a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    /// Gateway order identifier, echoed back by the payment confirmation.
    pub id: String,
}

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),

    /// No gateway credentials are configured.
    #[error("payment gateway is not configured")]
    NotConfigured,

    /// The payment signature does not match the gateway's.
    #[error("payment signature does not match")]
    InvalidSignature,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a gateway order for `charge`.
    async fn create_charge(&self, charge: ChargeRequest) -> Result<GatewayOrder, GatewayError>;

    /// Check that `signature` was issued by the gateway for this payment of this order.
    fn verify_payment(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature: &str,
    ) -> Result<(), GatewayError>;
}

/// Gateway used when no credentials are configured; every charge and signature is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_charge(&self, _charge: ChargeRequest) -> Result<GatewayOrder, GatewayError> {
        Err(GatewayError::NotConfigured)
    }

    fn verify_payment(
        &self,
        _gateway_order_id: &str,
        _gateway_payment_id: &str,
        _signature: &str,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_gateway_rejects_charges() {
        let result = DisabledGateway
            .create_charge(ChargeRequest {
                amount_minor: 100,
                currency: "INR".to_string(),
                receipt: "order".to_string(),
                capture_immediately: true,
            })
            .await;

        assert!(matches!(result, Err(GatewayError::NotConfigured)));
    }

    #[test]
    fn disabled_gateway_rejects_signatures() {
        let result = DisabledGateway.verify_payment("order_1", "pay_1", "00");

        assert!(matches!(result, Err(GatewayError::NotConfigured)));
    }
}
