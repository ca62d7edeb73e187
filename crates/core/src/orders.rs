//! Orders
//!
//! An order carries two independent status axes. Fulfillment tracks the shipment and
//! payment tracks the money; each is a small state machine and every change is checked
//! against it before it is persisted.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Shipping/delivery state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FulfillmentStatus {
    /// Placed, not yet confirmed by the store.
    Pending,

    /// Accepted by the store.
    Confirmed,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled before delivery. Terminal.
    Cancelled,

    /// Sent back after delivery. Terminal.
    Returned,
}

impl FulfillmentStatus {
    /// Every fulfillment status.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Returned,
    ];

    /// Stable lowercase name, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }

    /// Whether the order may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
                | (Self::Delivered, Self::Returned)
                | (Self::Pending | Self::Confirmed | Self::Shipped, Self::Cancelled)
        )
    }

    /// Whether the customer may still cancel.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        self.can_transition_to(Self::Cancelled)
    }

    /// Whether no further fulfillment changes are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Returned)
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when the move is not an edge of the fulfillment graph.
    pub const fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                axis: StatusAxis::Fulfillment,
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    /// Awaiting payment (cash on delivery, or gateway not yet confirmed).
    Pending,

    /// Payment captured.
    Paid,

    /// Gateway reported a failure; may be retried.
    Failed,

    /// Captured payment returned to the customer. Terminal.
    Refunded,
}

impl PaymentStatus {
    /// Every payment status.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Paid, Self::Failed, Self::Refunded];

    /// Stable lowercase name, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Whether the payment may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid | Self::Failed)
                | (Self::Failed, Self::Paid)
                | (Self::Paid, Self::Refunded)
        )
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when the move is not an edge of the payment graph.
    pub const fn transition_to(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                axis: StatusAxis::Payment,
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Paid to the courier; no gateway involved.
    CashOnDelivery,

    /// Paid through the payment gateway.
    Online,
}

impl PaymentMethod {
    /// Stable lowercase name, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::Online => "online",
        }
    }

    /// Whether placing an order with this method creates a gateway charge.
    #[must_use]
    pub const fn requires_gateway(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Which status axis an event or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAxis {
    /// [`FulfillmentStatus`].
    Fulfillment,

    /// [`PaymentStatus`].
    Payment,
}

impl StatusAxis {
    /// Stable lowercase name, as stored and serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fulfillment => "fulfillment",
            Self::Payment => "payment",
        }
    }
}

/// A status change that is not an edge of its state machine.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move {axis} status from {from} to {to}")]
pub struct TransitionError {
    /// Axis of the rejected change.
    pub axis: StatusAxis,

    /// Current status.
    pub from: &'static str,

    /// Requested status.
    pub to: &'static str,
}

/// A status, method or axis name that is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! impl_status_text {
    ($ty:ty, $kind:literal, [$($variant:path),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|candidate| candidate.as_str() == s)
                    .ok_or_else(|| ParseStatusError::new($kind, s))
            }
        }
    };
}

impl_status_text!(
    FulfillmentStatus,
    "fulfillment status",
    [
        FulfillmentStatus::Pending,
        FulfillmentStatus::Confirmed,
        FulfillmentStatus::Shipped,
        FulfillmentStatus::Delivered,
        FulfillmentStatus::Cancelled,
        FulfillmentStatus::Returned,
    ]
);

impl_status_text!(
    PaymentStatus,
    "payment status",
    [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ]
);

impl_status_text!(
    PaymentMethod,
    "payment method",
    [PaymentMethod::CashOnDelivery, PaymentMethod::Online]
);

impl_status_text!(
    StatusAxis,
    "status axis",
    [StatusAxis::Fulfillment, StatusAxis::Payment]
);
