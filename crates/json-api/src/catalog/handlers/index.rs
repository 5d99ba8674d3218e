//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar::catalog::{ProductSort, SizeOption};
use bazaar_app::domain::catalog::models::ProductFilter;

use crate::{
    catalog::{
        errors::into_status_error,
        models::{PageResponse, ProductSummaryResponse},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Products on the requested page
    pub products: Vec<ProductSummaryResponse>,

    pub page: PageResponse,

    /// Cheapest active product price
    pub min_price: u64,

    /// Dearest active product price
    pub max_price: u64,
}

/// Listing filters. `brand`, `size` and `color` take comma-separated lists and match any value.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ProductQuery {
    /// Category slug; includes its direct children
    category: Option<String>,
    brand: Option<String>,
    size: Option<String>,
    color: Option<String>,
    min_price: Option<u64>,
    max_price: Option<u64>,

    /// Only products that can be bought now
    available: Option<bool>,

    /// Free-text search
    q: Option<String>,

    /// `popularity`, `date`, `price_low`, `price_high` or `rating`
    sort: Option<String>,
    page: Option<u32>,
}

impl ProductQuery {
    fn into_filter(self) -> Result<ProductFilter, StatusError> {
        let sizes = split_list(self.size)
            .iter()
            .map(|size| size.parse::<SizeOption>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        Ok(ProductFilter {
            category: self.category.filter(|slug| !slug.is_empty()),
            brands: split_list(self.brand),
            sizes,
            colors: split_list(self.color),
            min_price: self.min_price,
            max_price: self.max_price,
            available_only: self.available.unwrap_or(false),
            query: self.q.filter(|query| !query.trim().is_empty()),
            sort: self
                .sort
                .map_or_else(ProductSort::default, |key| ProductSort::from_key(&key)),
            page: self.page,
        })
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Product Index Handler
#[endpoint(
    tags("catalog"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "One page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    query: ProductQuery,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let filter = query.into_filter()?;

    let listing = state
        .app
        .catalog
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: listing.products.into_iter().map(Into::into).collect(),
        page: listing.page.into(),
        min_price: listing.price_range.min,
        max_price: listing.price_range.max,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar::catalog::Page;
    use bazaar_app::domain::catalog::models::{PriceRange, ProductListing};

    use crate::{
        catalog::handlers::tests::make_summary,
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("products").get(handler))
    }

    fn listing(count: u64) -> ProductListing {
        ProductListing {
            products: (0..count)
                .map(|index| make_summary(&format!("product-{index}"), 100_000))
                .collect(),
            page: Page::resolve(Some(1), count),
            price_range: PriceRange {
                min: 100_000,
                max: 900_000,
            },
        }
    }

    #[tokio::test]
    async fn test_index_defaults_to_popularity_first_page() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .withf(|filter| {
                filter.sort == ProductSort::Popularity
                    && filter.page.is_none()
                    && filter.brands.is_empty()
                    && !filter.available_only
            })
            .return_once(|_| Ok(listing(2)));

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.page.number, 1);
        assert_eq!(response.min_price, 100_000);
        assert_eq!(response.max_price, 900_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .withf(|filter| {
                filter.category.as_deref() == Some("shirts")
                    && filter.brands == ["zara", "mango"]
                    && filter.sizes == [SizeOption::M, SizeOption::Xl]
                    && filter.min_price == Some(100)
                    && filter.max_price == Some(500)
                    && filter.available_only
                    && filter.query.as_deref() == Some("کتان")
                    && filter.sort == ProductSort::PriceLow
                    && filter.page == Some(3)
            })
            .return_once(|_| Ok(listing(0)));

        let res = TestClient::get(
            "http://example.com/products?category=shirts&brand=zara,mango&size=m,xl\
             &min_price=100&max_price=500&available=true&q=%DA%A9%D8%AA%D8%A7%D9%86\
             &sort=price_low&page=3",
        )
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_sort_falls_back_to_popularity() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_products()
            .once()
            .withf(|filter| filter.sort == ProductSort::Popularity)
            .return_once(|_| Ok(listing(0)));

        let res = TestClient::get("http://example.com/products?sort=cheapest")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_size_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.catalog.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?size=huge")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
