use clap::{Args, Subcommand};

mod approve;

#[derive(Debug, Args)]
pub(crate) struct ReviewCommand {
    #[command(subcommand)]
    command: ReviewSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewSubcommand {
    Approve(approve::ApproveReviewArgs),
}

pub(crate) async fn run(command: ReviewCommand) -> Result<(), String> {
    match command.command {
        ReviewSubcommand::Approve(args) => approve::run(args).await,
    }
}
