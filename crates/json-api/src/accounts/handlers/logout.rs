//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bazaar_app::notices::Notice;

use crate::{
    accounts::errors::into_status_error, extensions::*, notices::NoticeResponse, state::State,
};

const SIGNED_OUT: &str = "از حساب خود خارج شدید.";

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub notices: Vec<NoticeResponse>,
}

/// Logout Handler
///
/// Saves the session cart to the account, then revokes the session.
#[endpoint(
    tags("accounts"),
    summary = "Logout",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .accounts
        .logout(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LogoutResponse {
        notices: vec![Notice::info(SIGNED_OUT).into()],
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::accounts::AccountsServiceError;

    use crate::test_helpers::{Mocks, TEST_IDENTITY, signed_in_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        signed_in_service(mocks, Router::with_path("accounts/logout").post(handler))
    }

    #[tokio::test]
    async fn test_logout_revokes_current_session() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_logout()
            .once()
            .withf(|identity| *identity == TEST_IDENTITY)
            .return_once(|_| Ok(()));

        let body: LogoutResponse = TestClient::post("http://example.com/accounts/logout")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.notices[0].level, "info");
        assert_eq!(body.notices[0].message, SIGNED_OUT);

        Ok(())
    }

    #[tokio::test]
    async fn test_revoked_session_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_logout()
            .once()
            .return_once(|_| Err(AccountsServiceError::SessionNotFound));

        let res = TestClient::post("http://example.com/accounts/logout")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
