use bazaar_app::database::{self, Db};
use clap::{Parser, Subcommand};

mod about;
mod brand;
mod category;
mod contact;
mod db;
mod discount;
mod menu;
mod product;
mod review;

#[derive(Debug, Parser)]
#[command(name = "bazaar-app", about = "Bazaar storefront operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Category(category::CategoryCommand),
    Brand(brand::BrandCommand),
    Product(product::ProductCommand),
    Discount(discount::DiscountCommand),
    Review(review::ReviewCommand),
    Contact(contact::ContactCommand),
    Menu(menu::MenuCommand),
    About(about::AboutCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Brand(command) => brand::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Discount(command) => discount::run(command).await,
            Commands::Review(command) => review::run(command).await,
            Commands::Contact(command) => contact::run(command).await,
            Commands::Menu(command) => menu::run(command).await,
            Commands::About(command) => about::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}
