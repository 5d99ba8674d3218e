use bazaar::menu::MenuType;
use bazaar_app::domain::content::{
    ContentService, PgContentService,
    models::{MenuItemUuid, NewMenuItem},
};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateMenuItemArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    title: String,

    /// Link target; omitted links render as `#`
    #[arg(long)]
    url: Option<String>,

    /// Parent menu item UUID
    #[arg(long)]
    parent: Option<Uuid>,

    /// Display order, 0 to 1000
    #[arg(long, default_value_t = 0)]
    order: u16,

    /// main or footer
    #[arg(long = "type", default_value = "main")]
    menu_type: String,

    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateMenuItemArgs) -> Result<(), String> {
    let menu_type = args
        .menu_type
        .parse::<MenuType>()
        .map_err(|error| format!("invalid menu type: {error}"))?;

    let service = PgContentService::new(connect(&args.database_url).await?);

    let item = service
        .create_menu_item(NewMenuItem {
            uuid: MenuItemUuid::new(),
            title: args.title,
            url: args.url,
            parent: args.parent.map(MenuItemUuid::from_uuid),
            order: args.order,
            is_active: !args.inactive,
            menu_type,
        })
        .await
        .map_err(|error| format!("failed to create menu item: {error}"))?;

    println!("menu_item_uuid: {}", item.uuid);
    println!("menu_type: {}", item.menu_type.as_str());

    Ok(())
}
