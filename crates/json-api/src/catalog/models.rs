//! Catalog response bodies shared by several handlers.

use bazaar::catalog::Page;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::catalog::models::{Category, ProductSummary, Review};

/// Product card
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub category_name: String,
    pub category_slug: String,
    pub brand_name: Option<String>,

    /// Price in toman
    pub price: u64,
    pub old_price: Option<u64>,
    pub discount_percentage: u64,
    pub stock: u32,
    pub is_available: bool,

    /// One of `new`, `sale`, `hot`, `top`, `out`
    pub label: Option<String>,
    pub views_count: u64,
    pub main_image: Option<String>,
    pub average_rating: Option<f64>,
    pub created_at: String,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            uuid: product.uuid.into(),
            discount_percentage: product.discount_percentage(),
            name: product.name,
            slug: product.slug,
            category_name: product.category_name,
            category_slug: product.category_slug,
            brand_name: product.brand_name,
            price: product.price,
            old_price: product.old_price,
            stock: product.stock,
            is_available: product.is_available,
            label: product.label.map(|label| label.as_str().to_string()),
            views_count: product.views_count,
            main_image: product.main_image,
            average_rating: product.average_rating,
            created_at: product.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub parent: Option<Uuid>,
    pub description: String,

    /// Active products directly in this category
    pub product_count: u64,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            parent: category.parent.map(Into::into),
            description: category.description,
            product_count: category.product_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub name: String,

    /// 1 to 5
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            uuid: review.uuid.into(),
            product_name: review.product_name,
            product_slug: review.product_slug,
            name: review.name,
            rating: review.rating.get(),
            title: review.title,
            comment: review.comment,
            is_approved: review.is_approved,
            created_at: review.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse {
    pub number: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            number: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }
}
