use bazaar_app::domain::catalog::{
    CatalogService, PgCatalogService,
    models::{BrandUuid, NewBrand},
};
use clap::Args;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateBrandArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    /// Unique URL slug
    #[arg(long)]
    slug: String,

    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateBrandArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect(&args.database_url).await?);

    let brand = service
        .create_brand(NewBrand {
            uuid: BrandUuid::new(),
            name: args.name,
            slug: args.slug,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create brand: {error}"))?;

    println!("brand_uuid: {}", brand.uuid);
    println!("brand_slug: {}", brand.slug);

    Ok(())
}
