use bazaar_app::domain::content::{
    ContentService, PgContentService,
    models::{ContactInfoUuid, NewContactInfo},
};
use clap::Args;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateContactArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    office_address: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone1: String,

    #[arg(long)]
    phone2: Option<String>,

    /// Map iframe markup
    #[arg(long, default_value = "")]
    map_embed: String,

    #[arg(long)]
    facebook_url: Option<String>,

    #[arg(long)]
    twitter_url: Option<String>,

    #[arg(long)]
    instagram_url: Option<String>,

    #[arg(long)]
    youtube_url: Option<String>,

    #[arg(long)]
    pinterest_url: Option<String>,

    /// Store without replacing the active record
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateContactArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let info = service
        .create_contact_info(NewContactInfo {
            uuid: ContactInfoUuid::new(),
            office_address: args.office_address,
            email: args.email,
            phone1: args.phone1,
            phone2: args.phone2,
            map_embed: args.map_embed,
            facebook_url: args.facebook_url,
            twitter_url: args.twitter_url,
            instagram_url: args.instagram_url,
            youtube_url: args.youtube_url,
            pinterest_url: args.pinterest_url,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create contact info: {error}"))?;

    println!("contact_uuid: {}", info.uuid);
    println!("active: {}", info.is_active);

    Ok(())
}
