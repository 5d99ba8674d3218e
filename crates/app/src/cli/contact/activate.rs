use bazaar_app::domain::content::{ContentService, PgContentService, models::ContactInfoUuid};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ActivateContactArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Contact info UUID to make active
    #[arg(long)]
    contact: Uuid,
}

pub(crate) async fn run(args: ActivateContactArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let info = service
        .activate_contact_info(ContactInfoUuid::from_uuid(args.contact))
        .await
        .map_err(|error| format!("failed to activate contact info: {error}"))?;

    println!("active_contact_uuid: {}", info.uuid);
    println!("email: {}", info.email);

    Ok(())
}
