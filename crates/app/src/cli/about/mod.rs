use clap::{Args, Subcommand};

mod add;
mod set;

#[derive(Debug, Args)]
pub(crate) struct AboutCommand {
    #[command(subcommand)]
    command: AboutSubcommand,
}

#[derive(Debug, Subcommand)]
enum AboutSubcommand {
    Set(set::SetAboutArgs),
    AddBrand(add::AddBrandArgs),
    AddMember(add::AddMemberArgs),
    AddTestimonial(add::AddTestimonialArgs),
}

pub(crate) async fn run(command: AboutCommand) -> Result<(), String> {
    match command.command {
        AboutSubcommand::Set(args) => set::run(args).await,
        AboutSubcommand::AddBrand(args) => add::brand(args).await,
        AboutSubcommand::AddMember(args) => add::member(args).await,
        AboutSubcommand::AddTestimonial(args) => add::testimonial(args).await,
    }
}
