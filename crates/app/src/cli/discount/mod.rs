use clap::{Args, Subcommand};

mod create;
mod deactivate;
mod list;

#[derive(Debug, Args)]
pub(crate) struct DiscountCommand {
    #[command(subcommand)]
    command: DiscountSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountSubcommand {
    Create(create::CreateDiscountArgs),
    List(list::ListDiscountsArgs),
    Deactivate(deactivate::DeactivateDiscountArgs),
}

pub(crate) async fn run(command: DiscountCommand) -> Result<(), String> {
    match command.command {
        DiscountSubcommand::Create(args) => create::run(args).await,
        DiscountSubcommand::List(args) => list::run(args).await,
        DiscountSubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}
