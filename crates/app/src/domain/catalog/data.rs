//! Catalog Data

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::catalog::records::{BrandUuid, CategoryUuid, DealUuid, ProductUuid};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// New Brand Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub mrp: Option<Decimal>,
    pub stock: u32,
    pub category_uuid: Option<CategoryUuid>,
    pub brand_uuid: Option<BrandUuid>,
}

/// Product Price Update Data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdate {
    pub price: Decimal,
    pub mrp: Option<Decimal>,
}

/// New Deal Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub uuid: DealUuid,
    pub title: String,
    pub active: bool,
    pub expires_at: Timestamp,
    pub product_uuids: Vec<ProductUuid>,
}
