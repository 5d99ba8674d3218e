//! User Reviews Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, models::ReviewResponse},
    extensions::*,
    state::State,
};

/// User Reviews Handler
///
/// Every review the signed-in user wrote, approved or not.
#[endpoint(
    tags("accounts"),
    summary = "List My Reviews",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let reviews = state
        .app
        .catalog
        .list_user_reviews(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use bazaar::catalog::Rating;
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::catalog::models::{ProductUuid, Review, ReviewUuid};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, signed_in_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_pending_reviews_too() -> TestResult {
        let rating = Rating::try_from(5_i64)?;
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_user_reviews()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| {
                Ok(vec![Review {
                    uuid: ReviewUuid::new(),
                    product: ProductUuid::new(),
                    product_name: "Linen Shirt".to_string(),
                    product_slug: "linen-shirt".to_string(),
                    user: Some(user),
                    name: "sara@example.com".to_string(),
                    email: "sara@example.com".to_string(),
                    rating,
                    title: String::new(),
                    comment: "Great fit".to_string(),
                    is_approved: false,
                    created_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let service = signed_in_service(mocks, Router::with_path("accounts/reviews").get(handler));

        let body: Vec<ReviewResponse> = TestClient::get("http://example.com/accounts/reviews")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0].product_slug, "linen-shirt");
        assert!(!body[0].is_approved);

        Ok(())
    }
}
