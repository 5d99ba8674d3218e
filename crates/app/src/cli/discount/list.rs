use bazaar_app::domain::discounts::{DiscountsService, PgDiscountsService};
use clap::Args;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct ListDiscountsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListDiscountsArgs) -> Result<(), String> {
    let service = PgDiscountsService::new(connect(&args.database_url).await?);

    let codes = service
        .list_codes()
        .await
        .map_err(|error| format!("failed to list discount codes: {error}"))?;

    if codes.is_empty() {
        println!("no discount codes found");
        return Ok(());
    }

    for code in codes {
        let rule = &code.rule;

        println!("code: {}", rule.code);
        println!("discount_uuid: {}", code.uuid);
        println!("kind: {}", rule.kind.as_str());
        println!("scope: {}", rule.scope.as_str());
        println!("value: {}", rule.value);
        println!("min_order_amount: {}", rule.min_order_amount);
        println!(
            "usage: {}/{}",
            rule.used_count,
            rule.usage_limit_total
                .map_or_else(|| "unlimited".to_string(), |limit| limit.to_string())
        );
        println!(
            "window: {} .. {}",
            rule.starts_at
                .map_or_else(|| "open".to_string(), |value| value.to_string()),
            rule.ends_at
                .map_or_else(|| "open".to_string(), |value| value.to_string())
        );
        println!("active: {}", rule.is_active);
        println!();
    }

    Ok(())
}
