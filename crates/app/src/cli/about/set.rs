use bazaar_app::domain::content::{ContentService, PgContentService};
use clap::Args;

use crate::cli::connect;

/// Fields left out keep their current value.
#[derive(Debug, Args)]
pub(crate) struct SetAboutArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    vision_title: Option<String>,

    #[arg(long)]
    vision_description: Option<String>,

    #[arg(long)]
    mission_title: Option<String>,

    #[arg(long)]
    mission_description: Option<String>,

    #[arg(long)]
    who_we_are_title: Option<String>,

    #[arg(long)]
    who_we_are_subtitle: Option<String>,

    #[arg(long)]
    who_we_are_description: Option<String>,

    #[arg(long)]
    who_we_are_image_front: Option<String>,

    #[arg(long)]
    who_we_are_image_back: Option<String>,

    #[arg(long)]
    brands_title: Option<String>,

    #[arg(long)]
    brands_description: Option<String>,

    #[arg(long)]
    team_title: Option<String>,

    #[arg(long)]
    testimonials_title: Option<String>,
}

pub(crate) async fn run(args: SetAboutArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    let mut page = service
        .about()
        .await
        .map_err(|error| format!("failed to load about page: {error}"))?
        .page;

    let replace = |field: &mut String, value: Option<String>| {
        if let Some(value) = value {
            *field = value;
        }
    };

    replace(&mut page.vision_title, args.vision_title);
    replace(&mut page.vision_description, args.vision_description);
    replace(&mut page.mission_title, args.mission_title);
    replace(&mut page.mission_description, args.mission_description);
    replace(&mut page.who_we_are_title, args.who_we_are_title);
    replace(&mut page.who_we_are_subtitle, args.who_we_are_subtitle);
    replace(&mut page.who_we_are_description, args.who_we_are_description);
    replace(&mut page.brands_title, args.brands_title);
    replace(&mut page.brands_description, args.brands_description);
    replace(&mut page.team_title, args.team_title);
    replace(&mut page.testimonials_title, args.testimonials_title);

    if args.who_we_are_image_front.is_some() {
        page.who_we_are_image_front = args.who_we_are_image_front;
    }

    if args.who_we_are_image_back.is_some() {
        page.who_we_are_image_back = args.who_we_are_image_back;
    }

    let saved = service
        .set_about(page)
        .await
        .map_err(|error| format!("failed to save about page: {error}"))?;

    println!("vision_title: {}", saved.vision_title);
    println!("mission_title: {}", saved.mission_title);
    println!("who_we_are_title: {}", saved.who_we_are_title);

    Ok(())
}
