//! Catalog Models

use bazaar::catalog::{Page, ProductLabel, ProductSort, Rating, SizeOption};
use jiff::Timestamp;

use crate::{domain::accounts::models::UserUuid, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Brand UUID
pub type BrandUuid = TypedUuid<Brand>;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Number of products in each home feed rail.
pub const HOME_RAIL_SIZE: i64 = 8;

/// Number of top-level categories on the home feed.
pub const HOME_CATEGORY_COUNT: i64 = 6;

/// Number of related products on a detail page.
pub const RELATED_PRODUCT_COUNT: i64 = 8;

/// Category Model
#[derive(Debug, Clone)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub parent: Option<CategoryUuid>,
    pub description: String,
    pub is_active: bool,

    /// Active and available products filed directly under this category.
    pub product_count: u64,
    pub created_at: Timestamp,
}

/// New Category Model
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub parent: Option<CategoryUuid>,
    pub description: String,
    pub is_active: bool,
}

/// Brand Model
#[derive(Debug, Clone)]
pub struct Brand {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// New Brand Model
#[derive(Debug, Clone)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
}

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub category: CategoryUuid,
    pub category_name: String,
    pub category_slug: String,
    pub brand: Option<BrandUuid>,
    pub brand_name: Option<String>,
    pub description: String,
    pub full_description: String,
    pub price: u64,
    pub old_price: Option<u64>,
    pub stock: u32,
    pub is_available: bool,
    pub is_active: bool,
    pub label: Option<ProductLabel>,
    pub views_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Whole-percent markdown from `old_price`, zero without one.
    #[must_use]
    pub fn discount_percentage(&self) -> u64 {
        bazaar::catalog::discount_percentage(self.price, self.old_price)
    }

    /// Whether the product can be put in a cart right now.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.is_available && self.stock > 0
    }
}

/// New Product Model
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub category: CategoryUuid,
    pub brand: Option<BrandUuid>,
    pub description: String,
    pub full_description: String,
    pub price: u64,
    pub old_price: Option<u64>,
    pub stock: u32,
    pub is_available: bool,
    pub is_active: bool,
    pub label: Option<ProductLabel>,
    pub images: Vec<NewProductImage>,
    pub colors: Vec<NewProductColor>,
    pub sizes: Vec<SizeOption>,
}

/// Image attached to a new product.
#[derive(Debug, Clone)]
pub struct NewProductImage {
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
    pub order: i32,
}

/// Colour attached to a new product.
#[derive(Debug, Clone)]
pub struct NewProductColor {
    pub name: String,
    pub hex_code: String,
}

/// Product as shown in listings and rails.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub category_name: String,
    pub category_slug: String,
    pub brand_name: Option<String>,
    pub price: u64,
    pub old_price: Option<u64>,
    pub stock: u32,
    pub is_available: bool,
    pub label: Option<ProductLabel>,
    pub views_count: u64,
    pub main_image: Option<String>,
    pub average_rating: Option<f64>,
    pub created_at: Timestamp,
}

impl ProductSummary {
    #[must_use]
    pub fn discount_percentage(&self) -> u64 {
        bazaar::catalog::discount_percentage(self.price, self.old_price)
    }
}

#[derive(Debug, Clone)]
pub struct ProductImage {
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
    pub order: i32,
}

#[derive(Debug, Clone)]
pub struct ProductColor {
    pub name: String,
    pub hex_code: String,
    pub is_available: bool,
}

#[derive(Debug, Clone)]
pub struct ProductSize {
    pub size: SizeOption,
    pub is_available: bool,
}

/// Neighbouring product within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub name: String,
    pub slug: String,
}

/// Everything the product page shows.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub colors: Vec<ProductColor>,
    pub sizes: Vec<ProductSize>,

    /// Approved reviews, newest first.
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    pub related: Vec<ProductSummary>,
    pub previous: Option<ProductLink>,
    pub next: Option<ProductLink>,
}

impl ProductDetail {
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

/// Listing filters. Empty collections impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<SizeOption>,
    pub colors: Vec<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub available_only: bool,
    pub query: Option<String>,
    pub sort: ProductSort,
    pub page: Option<u32>,
}

/// Price bounds over every active product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// One page of a product listing.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub products: Vec<ProductSummary>,
    pub page: Page,
    pub price_range: PriceRange,
}

/// Home page rails.
#[derive(Debug, Clone)]
pub struct HomeFeed {
    pub newest: Vec<ProductSummary>,
    pub most_viewed: Vec<ProductSummary>,
    pub categories: Vec<Category>,
}

/// Review Model
#[derive(Debug, Clone)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub product_slug: String,
    pub user: Option<UserUuid>,
    pub name: String,
    pub email: String,
    pub rating: Rating,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// Review form submitted by a signed-in shopper.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: i64,
    pub title: String,
    pub comment: String,
}
