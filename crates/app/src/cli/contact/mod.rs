use clap::{Args, Subcommand};

mod activate;
mod create;
mod messages;

#[derive(Debug, Args)]
pub(crate) struct ContactCommand {
    #[command(subcommand)]
    command: ContactSubcommand,
}

#[derive(Debug, Subcommand)]
enum ContactSubcommand {
    Create(create::CreateContactArgs),
    Activate(activate::ActivateContactArgs),
    Messages(messages::MessagesArgs),
}

pub(crate) async fn run(command: ContactCommand) -> Result<(), String> {
    match command.command {
        ContactSubcommand::Create(args) => create::run(args).await,
        ContactSubcommand::Activate(args) => activate::run(args).await,
        ContactSubcommand::Messages(args) => messages::run(args).await,
    }
}
