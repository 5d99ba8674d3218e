//! Home Feed Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        errors::into_status_error,
        models::{CategoryResponse, ProductSummaryResponse},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeResponse {
    /// Newest available products
    pub newest: Vec<ProductSummaryResponse>,

    /// Most viewed available products
    pub most_viewed: Vec<ProductSummaryResponse>,

    /// Top-level categories
    pub categories: Vec<CategoryResponse>,
}

/// Home Feed Handler
#[endpoint(tags("catalog"), summary = "Home Feed")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let feed = state
        .app
        .catalog
        .home_feed()
        .await
        .map_err(into_status_error)?;

    Ok(Json(HomeResponse {
        newest: feed.newest.into_iter().map(Into::into).collect(),
        most_viewed: feed.most_viewed.into_iter().map(Into::into).collect(),
        categories: feed.categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::catalog::{CatalogServiceError, models::HomeFeed};

    use crate::{
        catalog::handlers::tests::{make_category, make_summary},
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("home").get(handler))
    }

    #[tokio::test]
    async fn test_home_lists_rails_and_categories() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.catalog.expect_home_feed().once().return_once(|| {
            Ok(HomeFeed {
                newest: vec![make_summary("linen-shirt", 450_000)],
                most_viewed: vec![],
                categories: vec![make_category("shirts")],
            })
        });

        let response: HomeResponse = TestClient::get("http://example.com/home")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.newest.len(), 1, "expected one new product");
        assert!(response.most_viewed.is_empty());
        assert_eq!(response.categories.len(), 1, "expected one category");

        Ok(())
    }

    #[tokio::test]
    async fn test_home_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_home_feed()
            .once()
            .return_once(|| Err(CatalogServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/home")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
