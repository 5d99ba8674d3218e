use bazaar_app::domain::catalog::{CatalogService, PgCatalogService, models::ReviewUuid};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ApproveReviewArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Review UUID
    #[arg(long)]
    review: Uuid,
}

pub(crate) async fn run(args: ApproveReviewArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect(&args.database_url).await?);

    let review = service
        .approve_review(ReviewUuid::from_uuid(args.review))
        .await
        .map_err(|error| format!("failed to approve review: {error}"))?;

    println!("review_uuid: {}", review.uuid);
    println!("product_slug: {}", review.product_slug);
    println!("rating: {}", review.rating.get());

    Ok(())
}
