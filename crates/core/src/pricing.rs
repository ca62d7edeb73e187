//! Pricing
//!
//! Products carry a selling price and, optionally, a maximum retail price (MRP). When the
//! MRP is above the selling price the storefront advertises a whole-number discount
//! percentage, and the price charged is recomputed from the MRP and that floored
//! percentage. Because of the floor the charged price can sit slightly above the
//! selling price: a product selling at 100 with an MRP of 150 is advertised at 33% off
//! and charged 100.5.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// Selling price and optional MRP of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPrice {
    /// Selling price.
    pub price: Decimal,

    /// Maximum retail price, when advertised.
    pub mrp: Option<Decimal>,
}

impl ListPrice {
    /// Create a list price.
    #[must_use]
    pub const fn new(price: Decimal, mrp: Option<Decimal>) -> Self {
        Self { price, mrp }
    }

    /// List price without an MRP.
    #[must_use]
    pub const fn flat(price: Decimal) -> Self {
        Self { price, mrp: None }
    }

    /// Whole-number discount percentage advertised against the MRP.
    ///
    /// Zero when there is no MRP or the MRP does not exceed the selling price.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        match self.discounted_mrp() {
            Some(mrp) => ((mrp - self.price) * Decimal::ONE_HUNDRED / mrp)
                .floor()
                .to_u32()
                .unwrap_or(0),
            None => 0,
        }
    }

    /// Price after applying [`Self::discount_percent`] to the MRP.
    ///
    /// Falls back to the selling price when no discount applies.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        let percent = self.discount_percent();

        match self.discounted_mrp() {
            Some(mrp) if percent > 0 => {
                mrp - mrp * Decimal::from(percent) / Decimal::ONE_HUNDRED
            }
            _ => self.price,
        }
    }

    /// Effective unit price charged for one unit of the product.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.discounted_price()
    }

    /// Effective price of `quantity` units.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.unit_price() * Decimal::from(quantity)
    }

    fn discounted_mrp(&self) -> Option<Decimal> {
        self.mrp
            .filter(|mrp| *mrp > self.price && *mrp > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap_or(Decimal::MIN)
    }

    #[test]
    fn no_mrp_means_no_discount() {
        let price = ListPrice::flat(dec("499.00"));

        assert_eq!(price.discount_percent(), 0);
        assert_eq!(price.discounted_price(), dec("499.00"));
        assert_eq!(price.unit_price(), dec("499.00"));
    }

    #[test]
    fn mrp_at_or_below_price_means_no_discount() {
        for mrp in ["499.00", "450.00", "0"] {
            let price = ListPrice::new(dec("499.00"), Some(dec(mrp)));

            assert_eq!(price.discount_percent(), 0, "mrp {mrp} should not discount");
            assert_eq!(price.unit_price(), dec("499.00"), "mrp {mrp} changed price");
        }
    }

    #[test]
    fn discount_is_floored_then_recomputed_from_mrp() {
        let price = ListPrice::new(dec("100"), Some(dec("150")));

        assert_eq!(price.discount_percent(), 33);
        assert_eq!(price.discounted_price(), dec("100.5"));
    }

    #[test]
    fn exact_percentages_reproduce_selling_price() {
        let price = ListPrice::new(dec("750.00"), Some(dec("1000.00")));

        assert_eq!(price.discount_percent(), 25);
        assert_eq!(price.unit_price(), dec("750.00"));
    }

    #[test]
    fn discounts_below_one_percent_keep_selling_price() {
        let price = ListPrice::new(dec("99.50"), Some(dec("100.00")));

        assert_eq!(price.discount_percent(), 0);
        assert_eq!(price.unit_price(), dec("99.50"));
    }

    #[test]
    fn free_product_with_mrp_is_fully_discounted() {
        let price = ListPrice::new(Decimal::ZERO, Some(dec("80")));

        assert_eq!(price.discount_percent(), 100);
        assert_eq!(price.unit_price(), Decimal::ZERO);
    }

    #[test]
    fn line_total_multiplies_unit_price() {
        let price = ListPrice::new(dec("100"), Some(dec("150")));

        assert_eq!(price.line_total(3), dec("301.5"));
        assert_eq!(price.line_total(0), Decimal::ZERO);
    }
}
