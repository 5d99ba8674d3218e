use bazaar::discounts::DiscountKind;
use bazaar_app::domain::{
    catalog::models::ProductUuid,
    discounts::{
        DiscountsService, PgDiscountsService,
        models::{DiscountCodeUuid, NewDiscountCode, NewDiscountScope},
    },
};
use clap::Args;
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateDiscountArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Code shoppers type; stored upper-cased
    #[arg(long)]
    code: String,

    /// percent or fixed
    #[arg(long, default_value = "percent")]
    kind: String,

    /// Percentage, or toman amount for fixed codes
    #[arg(long)]
    value: u64,

    /// Restrict the code to one product
    #[arg(long)]
    product: Option<Uuid>,

    /// Cap on a percentage discount, in toman
    #[arg(long)]
    max_discount: Option<u64>,

    /// Minimum cart subtotal, in toman
    #[arg(long, default_value_t = 0)]
    min_order: u64,

    /// Start of validity (RFC 3339)
    #[arg(long)]
    starts_at: Option<String>,

    /// End of validity (RFC 3339)
    #[arg(long)]
    ends_at: Option<String>,

    #[arg(long)]
    usage_limit_total: Option<u32>,

    #[arg(long)]
    usage_limit_per_user: Option<u32>,

    /// Create the code switched off
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateDiscountArgs) -> Result<(), String> {
    let kind = args
        .kind
        .parse::<DiscountKind>()
        .map_err(|error| format!("invalid kind: {error}"))?;

    let scope = args
        .product
        .map_or(NewDiscountScope::Cart, |product| {
            NewDiscountScope::Product(ProductUuid::from_uuid(product))
        });

    let starts_at = parse_timestamp("starts-at", args.starts_at.as_deref())?;
    let ends_at = parse_timestamp("ends-at", args.ends_at.as_deref())?;

    let service = PgDiscountsService::new(connect(&args.database_url).await?);

    let created = service
        .create_code(NewDiscountCode {
            uuid: DiscountCodeUuid::new(),
            code: args.code,
            kind,
            scope,
            value: args.value,
            max_discount_amount: args.max_discount,
            min_order_amount: args.min_order,
            starts_at,
            ends_at,
            usage_limit_total: args.usage_limit_total,
            usage_limit_per_user: args.usage_limit_per_user,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create discount code: {error}"))?;

    println!("discount_uuid: {}", created.uuid);
    println!("code: {}", created.code());

    Ok(())
}

fn parse_timestamp(flag: &str, raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid {flag} timestamp: {error}"))
    })
    .transpose()
}
