use bazaar_app::domain::catalog::{
    CatalogService, PgCatalogService,
    models::{CategoryUuid, NewCategory},
};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Unique URL slug
    #[arg(long)]
    slug: String,

    /// Parent category UUID
    #[arg(long)]
    parent: Option<Uuid>,

    #[arg(long, default_value = "")]
    description: String,

    /// Create the category hidden
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect(&args.database_url).await?);

    let category = service
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            slug: args.slug,
            parent: args.parent.map(CategoryUuid::from_uuid),
            description: args.description,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}
