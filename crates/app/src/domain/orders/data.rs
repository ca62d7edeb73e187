//! Order Data

use storefront::orders::PaymentMethod;

/// Billing party captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub phone: String,
}

impl BillingDetails {
    /// First and last name joined for print.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Delivery address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingDetails {
    /// Fill every blank field from the billing details.
    #[must_use]
    pub fn or_billing(self, billing: &BillingDetails) -> Self {
        fn pick(value: String, fallback: &str) -> String {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value
            }
        }

        Self {
            address: pick(self.address, &billing.address),
            city: pick(self.city, &billing.city),
            country: pick(self.country, &billing.country),
            zip_code: pick(self.zip_code, &billing.zip_code),
            phone: pick(self.phone, &billing.phone),
        }
    }
}

/// Checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub billing: BillingDetails,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub accepted_terms: bool,
}

/// Gateway callback reporting the result of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// Gateway order id the payment was made against.
    pub gateway_order_id: String,

    /// Gateway payment id.
    pub gateway_payment_id: String,

    /// Whether the payment was captured.
    pub succeeded: bool,

    /// Hex HMAC the gateway returned with a successful payment.
    pub signature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing() -> BillingDetails {
        BillingDetails {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            country: "India".to_string(),
            zip_code: "560001".to_string(),
            phone: "9800000000".to_string(),
        }
    }

    #[test]
    fn blank_shipping_fields_fall_back_to_billing() {
        let shipping = ShippingDetails {
            address: "4 Park Street".to_string(),
            city: "  ".to_string(),
            ..ShippingDetails::default()
        }
        .or_billing(&billing());

        assert_eq!(
            shipping,
            ShippingDetails {
                address: "4 Park Street".to_string(),
                city: "Bengaluru".to_string(),
                country: "India".to_string(),
                zip_code: "560001".to_string(),
                phone: "9800000000".to_string(),
            }
        );
    }

    #[test]
    fn full_name_skips_missing_parts() {
        let billing = BillingDetails {
            last_name: String::new(),
            ..billing()
        };

        assert_eq!(billing.full_name(), "Asha");
    }
}
