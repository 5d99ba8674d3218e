use bazaar_app::domain::discounts::{DiscountsService, PgDiscountsService};
use clap::Args;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct DeactivateDiscountArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Code to switch off
    #[arg(long)]
    code: String,
}

pub(crate) async fn run(args: DeactivateDiscountArgs) -> Result<(), String> {
    let service = PgDiscountsService::new(connect(&args.database_url).await?);

    let code = service
        .deactivate_code(&args.code)
        .await
        .map_err(|error| format!("failed to deactivate discount code: {error}"))?;

    println!("deactivated: {}", code.code());

    Ok(())
}
