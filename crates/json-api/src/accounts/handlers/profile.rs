//! Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    accounts::{errors::into_status_error, models::ProfileResponse},
    extensions::*,
    state::State,
};

/// Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let profile = state
        .app
        .accounts
        .get_profile(identity.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        accounts::handlers::tests::make_profile,
        test_helpers::{Mocks, TEST_USER_UUID, public_service, signed_in_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_complete_profile_is_flagged() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_get_profile()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(make_profile()));

        let service = signed_in_service(mocks, Router::with_path("accounts/profile").get(handler));

        let body: ProfileResponse = TestClient::get("http://example.com/accounts/profile")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert!(body.is_complete);
        assert_eq!(body.display_name, "Sara Ahmadi");

        Ok(())
    }

    #[tokio::test]
    async fn test_requires_session() -> TestResult {
        let service = public_service(
            Mocks::default(),
            Router::with_path("accounts/profile").get(handler),
        );

        let res = TestClient::get("http://example.com/accounts/profile")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
