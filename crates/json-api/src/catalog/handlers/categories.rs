//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// Active categories
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .catalog
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        catalog::handlers::tests::make_category,
        test_helpers::{Mocks, public_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_categories_are_listed() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_categories()
            .once()
            .return_once(|| Ok(vec![make_category("shirts"), make_category("shoes")]));

        let response: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&public_service(
                mocks,
                Router::with_path("categories").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.categories.len(), 2, "expected two categories");
        assert_eq!(response.categories[0].slug, "shirts");

        Ok(())
    }
}
