use clap::Args;
use rust_decimal::Decimal;
use storefront::pricing::ListPrice;
use storefront_app::{
    database::Db,
    domain::catalog::{
        CatalogService, PgCatalogService,
        data::{NewCategory, NewProduct},
        records::{CategoryUuid, ProductUuid},
    },
};

use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Selling price
    #[arg(long)]
    price: Decimal,

    /// Optional list price (MRP); a discount is shown when it exceeds the price
    #[arg(long)]
    mrp: Option<Decimal>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Category name; created when it does not exist yet
    #[arg(long)]
    category: Option<String>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SeedProductArgs) -> Result<(), String> {
    if args.price.is_sign_negative() {
        return Err("price cannot be negative".to_string());
    }

    let pool = args.database.connect().await?;

    let catalog = PgCatalogService::new(Db::new(pool));

    let category_uuid = match args.category {
        Some(name) => Some(find_or_create_category(&catalog, name).await?),
        None => None,
    };

    let product = catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            description: args.description,
            price: args.price,
            mrp: args.mrp,
            stock: args.stock,
            category_uuid,
            brand_uuid: None,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    let pricing = ListPrice::new(product.price, product.mrp);

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("unit_price: {}", pricing.unit_price());
    println!("discount_percent: {}", pricing.discount_percent());

    Ok(())
}

async fn find_or_create_category(
    catalog: &PgCatalogService,
    name: String,
) -> Result<CategoryUuid, String> {
    let categories = catalog
        .list_categories()
        .await
        .map_err(|error| format!("failed to list categories: {error}"))?;

    if let Some(category) = categories.iter().find(|category| category.name == name) {
        return Ok(category.uuid);
    }

    catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name,
        })
        .await
        .map(|category| category.uuid)
        .map_err(|error| format!("failed to create category: {error}"))
}
