use bazaar_app::domain::content::{ContentService, PgContentService, models::ContactMessageUuid};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct MessagesArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only list unread messages
    #[arg(long)]
    unread: bool,

    /// Mark this message read instead of listing
    #[arg(long)]
    mark_read: Option<Uuid>,
}

pub(crate) async fn run(args: MessagesArgs) -> Result<(), String> {
    let service = PgContentService::new(connect(&args.database_url).await?);

    if let Some(message) = args.mark_read {
        let read = service
            .mark_message_read(ContactMessageUuid::from_uuid(message))
            .await
            .map_err(|error| format!("failed to mark message read: {error}"))?;

        println!("marked_read: {}", read.uuid);

        return Ok(());
    }

    let messages = service
        .list_messages(args.unread)
        .await
        .map_err(|error| format!("failed to list messages: {error}"))?;

    if messages.is_empty() {
        println!("no messages found");
        return Ok(());
    }

    for message in messages {
        println!("message_uuid: {}", message.uuid);
        println!("from: {} <{}>", message.name, message.email);
        println!("phone: {}", message.phone.as_deref().unwrap_or("-"));
        println!("subject: {}", message.subject.as_deref().unwrap_or("-"));
        println!("received_at: {}", message.created_at);
        println!("read: {}", message.is_read);
        println!("{}", message.message);
        println!();
    }

    Ok(())
}
