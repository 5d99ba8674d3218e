use bazaar::catalog::{ProductLabel, SizeOption};
use bazaar_app::domain::catalog::{
    CatalogService, PgCatalogService,
    models::{BrandUuid, CategoryUuid, NewProduct, NewProductColor, NewProductImage, ProductUuid},
};
use clap::Args;
use uuid::Uuid;

use crate::cli::connect;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    /// Unique URL slug
    #[arg(long)]
    slug: String,

    /// Category UUID
    #[arg(long)]
    category: Uuid,

    /// Brand UUID
    #[arg(long)]
    brand: Option<Uuid>,

    /// Price in toman
    #[arg(long)]
    price: u64,

    /// Price before markdown, in toman
    #[arg(long)]
    old_price: Option<u64>,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    full_description: String,

    /// One of new, sale, hot, top, out
    #[arg(long)]
    label: Option<String>,

    /// Image URL; the first one is the main image. Repeatable.
    #[arg(long = "image")]
    images: Vec<String>,

    /// Color as `name:#hex`. Repeatable.
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Size (xs, s, m, l, xl, xxl). Repeatable.
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// Create the product hidden from the storefront
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let label = args
        .label
        .as_deref()
        .map(str::parse::<ProductLabel>)
        .transpose()
        .map_err(|error| format!("invalid label: {error}"))?;

    let sizes = args
        .sizes
        .iter()
        .map(|size| size.parse::<SizeOption>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("invalid size: {error}"))?;

    let colors = args
        .colors
        .iter()
        .map(|color| parse_color(color))
        .collect::<Result<Vec<_>, _>>()?;

    let images = args
        .images
        .iter()
        .zip(0_i32..)
        .map(|(url, order)| NewProductImage {
            url: url.clone(),
            alt_text: args.name.clone(),
            is_main: order == 0,
            order,
        })
        .collect();

    let service = PgCatalogService::new(connect(&args.database_url).await?);

    let product = service
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            slug: args.slug,
            category: CategoryUuid::from_uuid(args.category),
            brand: args.brand.map(BrandUuid::from_uuid),
            description: args.description,
            full_description: args.full_description,
            price: args.price,
            old_price: args.old_price,
            stock: args.stock,
            is_available: args.stock > 0,
            is_active: !args.inactive,
            label,
            images,
            colors,
            sizes,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);

    Ok(())
}

fn parse_color(raw: &str) -> Result<NewProductColor, String> {
    let (name, hex_code) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid color {raw:?}, expected name:#hex"))?;

    Ok(NewProductColor {
        name: name.trim().to_string(),
        hex_code: hex_code.trim().to_string(),
    })
}
