//! Catalog Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use storefront::pricing::ListPrice;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Brand UUID
pub type BrandUuid = TypedUuid<BrandRecord>;

/// Deal UUID
pub type DealUuid = TypedUuid<DealRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub mrp: Option<Decimal>,
    pub stock: u32,
    pub category_uuid: Option<CategoryUuid>,
    pub brand_uuid: Option<BrandUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Selling price and MRP, for the pricing engine.
    #[must_use]
    pub fn list_price(&self) -> ListPrice {
        ListPrice::new(self.price, self.mrp)
    }
}

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// Brand Record
#[derive(Debug, Clone, PartialEq)]
pub struct BrandRecord {
    pub uuid: BrandUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// Deal Record
#[derive(Debug, Clone, PartialEq)]
pub struct DealRecord {
    pub uuid: DealUuid,
    pub title: String,
    pub active: bool,
    pub expires_at: Timestamp,
    pub product_uuids: Vec<ProductUuid>,
    pub created_at: Timestamp,
}

impl DealRecord {
    /// A deal is live while it is active and has not yet expired.
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.active && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;

    fn deal(active: bool, expires_at: Timestamp) -> DealRecord {
        DealRecord {
            uuid: DealUuid::new(),
            title: "Monsoon Sale".to_string(),
            active,
            expires_at,
            product_uuids: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn deal_is_live_only_while_active_and_unexpired() {
        let now = Timestamp::now();
        let later = now + SignedDuration::from_hours(1);
        let earlier = now - SignedDuration::from_hours(1);

        assert!(deal(true, later).is_live(now));
        assert!(!deal(false, later).is_live(now));
        assert!(!deal(true, earlier).is_live(now));
        assert!(!deal(true, now).is_live(now), "expiry is exclusive");
    }
}
