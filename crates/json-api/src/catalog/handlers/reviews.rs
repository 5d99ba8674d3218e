//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::{domain::catalog::models::NewReview, notices::Notice};

use crate::{
    catalog::{errors::into_status_error, models::ReviewResponse},
    extensions::*,
    notices::NoticeResponse,
    state::State,
};

const REVIEW_RECEIVED: &str = "نظر شما با موفقیت ثبت شد و پس از تأیید نمایش داده می‌شود.";

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// 1 to 5
    pub rating: i64,

    #[serde(default)]
    pub title: String,

    pub comment: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            rating: request.rating,
            title: request.title,
            comment: request.comment,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewCreatedResponse {
    pub review: ReviewResponse,
    pub notices: Vec<NoticeResponse>,
}

/// Create Review Handler
///
/// Reviews stay hidden until an operator approves them.
#[endpoint(
    tags("catalog"),
    summary = "Review Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review stored for moderation"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid rating or comment"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let review = state
        .app
        .catalog
        .submit_review(identity.user, &slug.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(ReviewCreatedResponse {
        review: review.into(),
        notices: vec![Notice::success(REVIEW_RECEIVED).into()],
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar::catalog::{CatalogValueError, Rating};
    use bazaar_app::domain::catalog::{
        CatalogServiceError,
        models::{ProductUuid, Review, ReviewUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, signed_in_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        signed_in_service(
            mocks,
            Router::with_path("products/{slug}/reviews").post(handler),
        )
    }

    #[tokio::test]
    async fn test_review_is_stored_unapproved() -> TestResult {
        let rating = Rating::try_from(4_i64)?;
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_submit_review()
            .once()
            .withf(|user, slug, review| {
                *user == TEST_USER_UUID && slug == "linen-shirt" && review.rating == 4
            })
            .return_once(move |user, _, review| {
                Ok(Review {
                    uuid: ReviewUuid::new(),
                    product: ProductUuid::new(),
                    product_name: "Linen Shirt".to_string(),
                    product_slug: "linen-shirt".to_string(),
                    user: Some(user),
                    name: "sara@example.com".to_string(),
                    email: "sara@example.com".to_string(),
                    rating,
                    title: review.title,
                    comment: review.comment,
                    is_approved: false,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/products/linen-shirt/reviews")
            .json(&json!({ "rating": 4, "title": "خوب", "comment": "پارچه عالی" }))
            .send(&make_service(mocks))
            .await;

        let body: ReviewCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(!body.review.is_approved, "new reviews await approval");
        assert_eq!(body.review.rating, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_rating_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_submit_review()
            .once()
            .return_once(|_, _, _| {
                Err(CatalogServiceError::InvalidRating(
                    CatalogValueError::RatingOutOfRange(9),
                ))
            });

        let res = TestClient::post("http://example.com/products/linen-shirt/reviews")
            .json(&json!({ "rating": 9, "comment": "!" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
