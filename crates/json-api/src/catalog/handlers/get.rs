//! Product Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::catalog::models::{ProductDetail, ProductLink};

use crate::{
    catalog::{
        errors::into_status_error,
        models::{ProductSummaryResponse, ReviewResponse},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageResponse {
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ColorResponse {
    pub name: String,
    pub hex_code: String,
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SizeResponse {
    pub size: String,
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductLinkResponse {
    pub name: String,
    pub slug: String,
}

impl From<ProductLink> for ProductLinkResponse {
    fn from(link: ProductLink) -> Self {
        Self {
            name: link.name,
            slug: link.slug,
        }
    }
}

/// Product page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub category_name: String,
    pub category_slug: String,
    pub brand_name: Option<String>,
    pub description: String,
    pub full_description: String,
    pub price: u64,
    pub old_price: Option<u64>,
    pub discount_percentage: u64,
    pub stock: u32,
    pub is_available: bool,
    pub label: Option<String>,
    pub label_title: Option<String>,
    pub views_count: u64,
    pub images: Vec<ImageResponse>,
    pub colors: Vec<ColorResponse>,
    pub sizes: Vec<SizeResponse>,

    /// Approved reviews, newest first
    pub reviews: Vec<ReviewResponse>,
    pub review_count: usize,
    pub average_rating: Option<f64>,
    pub related: Vec<ProductSummaryResponse>,
    pub previous: Option<ProductLinkResponse>,
    pub next: Option<ProductLinkResponse>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        let review_count = detail.review_count();
        let product = detail.product;

        Self {
            uuid: product.uuid.into(),
            discount_percentage: product.discount_percentage(),
            name: product.name,
            slug: product.slug,
            category_name: product.category_name,
            category_slug: product.category_slug,
            brand_name: product.brand_name,
            description: product.description,
            full_description: product.full_description,
            price: product.price,
            old_price: product.old_price,
            stock: product.stock,
            is_available: product.is_available,
            label: product.label.map(|label| label.as_str().to_string()),
            label_title: product.label.map(|label| label.title().to_string()),
            views_count: product.views_count,
            images: detail
                .images
                .into_iter()
                .map(|image| ImageResponse {
                    url: image.url,
                    alt_text: image.alt_text,
                    is_main: image.is_main,
                })
                .collect(),
            colors: detail
                .colors
                .into_iter()
                .map(|color| ColorResponse {
                    name: color.name,
                    hex_code: color.hex_code,
                    is_available: color.is_available,
                })
                .collect(),
            sizes: detail
                .sizes
                .into_iter()
                .map(|size| SizeResponse {
                    size: size.size.as_str().to_string(),
                    is_available: size.is_available,
                })
                .collect(),
            reviews: detail.reviews.into_iter().map(Into::into).collect(),
            review_count,
            average_rating: detail.average_rating,
            related: detail.related.into_iter().map(Into::into).collect(),
            previous: detail.previous.map(Into::into),
            next: detail.next.map(Into::into),
        }
    }
}

/// Product Detail Handler
///
/// Counts as a product view.
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let detail = state
        .app
        .catalog
        .product_detail(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(detail.into()))
}
