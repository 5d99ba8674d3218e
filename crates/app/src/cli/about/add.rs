use bazaar_app::domain::content::{
    ContentService, PgContentService,
    models::{
        AboutBrandUuid, NewAboutBrand, NewTeamMember, NewTestimonial, TeamMemberUuid,
        TestimonialUuid,
    },
};
use clap::Args;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct AddBrandArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    logo_url: Option<String>,

    #[arg(long, default_value = "")]
    website: String,

    #[arg(long, default_value_t = 0)]
    order: u32,
}

#[derive(Debug, Args)]
pub(crate) struct AddMemberArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    position: String,

    #[arg(long)]
    photo_url: Option<String>,

    #[arg(long, default_value = "")]
    bio: String,

    #[arg(long, default_value = "")]
    facebook_url: String,

    #[arg(long, default_value = "")]
    twitter_url: String,

    #[arg(long, default_value = "")]
    instagram_url: String,

    #[arg(long, default_value_t = 0)]
    order: u32,
}

#[derive(Debug, Args)]
pub(crate) struct AddTestimonialArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    customer_name: String,

    #[arg(long)]
    customer_role: Option<String>,

    #[arg(long)]
    photo_url: Option<String>,

    #[arg(long)]
    review: String,

    #[arg(long, default_value_t = 0)]
    order: u32,
}

pub(crate) async fn brand(args: AddBrandArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let brand = service
        .add_about_brand(NewAboutBrand {
            uuid: AboutBrandUuid::new(),
            name: args.name,
            logo_url: args.logo_url,
            website: args.website,
            order: args.order,
        })
        .await
        .map_err(|error| format!("failed to add brand: {error}"))?;

    println!("about_brand_uuid: {}", brand.uuid);

    Ok(())
}

pub(crate) async fn member(args: AddMemberArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let member = service
        .add_team_member(NewTeamMember {
            uuid: TeamMemberUuid::new(),
            name: args.name,
            position: args.position,
            photo_url: args.photo_url,
            bio: args.bio,
            facebook_url: args.facebook_url,
            twitter_url: args.twitter_url,
            instagram_url: args.instagram_url,
            order: args.order,
        })
        .await
        .map_err(|error| format!("failed to add team member: {error}"))?;

    println!("team_member_uuid: {}", member.uuid);

    Ok(())
}

pub(crate) async fn testimonial(args: AddTestimonialArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let testimonial = service
        .add_testimonial(NewTestimonial {
            uuid: TestimonialUuid::new(),
            customer_name: args.customer_name,
            customer_role: args.customer_role,
            photo_url: args.photo_url,
            review: args.review,
            order: args.order,
        })
        .await
        .map_err(|error| format!("failed to add testimonial: {error}"))?;

    println!("testimonial_uuid: {}", testimonial.uuid);

    Ok(())
}
