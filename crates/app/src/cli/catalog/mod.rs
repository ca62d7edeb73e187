use clap::{Args, Subcommand};

mod seed_product;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    SeedProduct(seed_product::SeedProductArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::SeedProduct(args) => seed_product::run(args).await,
    }
}
