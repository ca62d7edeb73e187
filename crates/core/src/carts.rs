//! Carts
//!
//! Cart limits and priced snapshots. Snapshots are always derived from the current list
//! prices of the products in the cart and are never persisted.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::ListPrice;

/// Limits applied whenever a cart line grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLimits {
    /// Maximum quantity of a single product in one cart.
    pub max_quantity_per_item: u32,

    /// Maximum monetary total of one cart.
    pub max_total_amount: Decimal,
}

/// Reasons a cart line may not grow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartLimitError {
    /// The line would hold more units than allowed.
    #[error("maximum {limit} quantity allowed per product")]
    QuantityLimitExceeded {
        /// Configured per-item maximum.
        limit: u32,
    },

    /// The cart total would exceed the allowed amount.
    #[error("cart total limit of {limit} exceeded")]
    CartTotalLimitExceeded {
        /// Configured cart total maximum.
        limit: Decimal,
    },
}

impl CartLimits {
    /// Check that one more unit of a product may be added.
    ///
    /// `current_quantity` is the line's quantity before the change (zero for a new line)
    /// and `cart_total` the snapshot total before the change. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartLimitError`] describing the first limit that would be exceeded.
    pub fn check_increment(
        &self,
        current_quantity: u32,
        unit_price: Decimal,
        cart_total: Decimal,
    ) -> Result<u32, CartLimitError> {
        let quantity = current_quantity.saturating_add(1);

        if quantity > self.max_quantity_per_item {
            return Err(CartLimitError::QuantityLimitExceeded {
                limit: self.max_quantity_per_item,
            });
        }

        if cart_total + unit_price > self.max_total_amount {
            return Err(CartLimitError::CartTotalLimitExceeded {
                limit: self.max_total_amount,
            });
        }

        Ok(quantity)
    }
}

/// A cart line that can be priced.
pub trait CartEntry {
    /// Number of units on the line.
    fn quantity(&self) -> u32;

    /// Current list price of the line's product.
    fn list_price(&self) -> ListPrice;
}

/// A priced cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine<L> {
    /// The underlying cart line.
    pub line: L,

    /// Effective unit price at snapshot time.
    pub unit_price: Decimal,

    /// `unit_price` multiplied by the line quantity.
    pub line_total: Decimal,
}

/// Priced view of a whole cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot<L> {
    lines: Vec<SnapshotLine<L>>,
    total: Decimal,
}

impl<L: CartEntry> CartSnapshot<L> {
    /// Price every line, keeping the given order.
    pub fn new(lines: impl IntoIterator<Item = L>) -> Self {
        let lines: Vec<SnapshotLine<L>> = lines
            .into_iter()
            .map(|line| {
                let list_price = line.list_price();

                SnapshotLine {
                    unit_price: list_price.unit_price(),
                    line_total: list_price.line_total(line.quantity()),
                    line,
                }
            })
            .collect();

        let total = lines.iter().map(|line| line.line_total).sum();

        Self { lines, total }
    }
}

impl<L> CartSnapshot<L> {
    /// Priced lines in cart order.
    pub fn lines(&self) -> &[SnapshotLine<L>] {
        &self.lines
    }

    /// Consume the snapshot, returning its lines.
    pub fn into_lines(self) -> Vec<SnapshotLine<L>> {
        self.lines
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<L> Default for CartSnapshot<L> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Line {
        quantity: u32,
        price: ListPrice,
    }

    impl CartEntry for Line {
        fn quantity(&self) -> u32 {
            self.quantity
        }

        fn list_price(&self) -> ListPrice {
            self.price
        }
    }

    fn limits() -> TestResult<CartLimits> {
        Ok(CartLimits {
            max_quantity_per_item: 3,
            max_total_amount: "1000".parse()?,
        })
    }

    #[test]
    fn snapshot_total_is_sum_of_line_totals() -> TestResult {
        let snapshot = CartSnapshot::new([
            Line {
                quantity: 2,
                price: ListPrice::flat("10.25".parse()?),
            },
            Line {
                quantity: 1,
                price: ListPrice::new("100".parse()?, Some("150".parse()?)),
            },
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.total(), "121".parse()?);

        let first = snapshot.lines().first().ok_or("missing line")?;

        assert_eq!(first.unit_price, "10.25".parse()?);
        assert_eq!(first.line_total, "20.50".parse()?);

        Ok(())
    }

    #[test]
    fn empty_snapshot_has_zero_total() {
        let snapshot = CartSnapshot::<Line>::new([]);

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total(), Decimal::ZERO);
        assert_eq!(snapshot, CartSnapshot::default());
    }

    #[test]
    fn increments_up_to_per_item_limit() -> TestResult {
        let limits = limits()?;
        let price: Decimal = "10".parse()?;

        assert_eq!(limits.check_increment(0, price, Decimal::ZERO)?, 1);
        assert_eq!(limits.check_increment(2, price, "20".parse()?)?, 3);
        assert_eq!(
            limits.check_increment(3, price, "30".parse()?),
            Err(CartLimitError::QuantityLimitExceeded { limit: 3 })
        );

        Ok(())
    }

    #[test]
    fn rejects_increment_past_total_limit() -> TestResult {
        let limits = limits()?;

        assert_eq!(
            limits.check_increment(1, "400".parse()?, "700".parse()?),
            Err(CartLimitError::CartTotalLimitExceeded {
                limit: "1000".parse()?
            })
        );

        Ok(())
    }

    #[test]
    fn total_limit_is_inclusive() -> TestResult {
        let limits = limits()?;

        assert_eq!(limits.check_increment(1, "300".parse()?, "700".parse()?)?, 2);

        Ok(())
    }
}
