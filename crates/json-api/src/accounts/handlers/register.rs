//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::{domain::accounts::models::Registration, notices::Notice};

use crate::{
    accounts::{errors::into_status_error, models::UserResponse},
    extensions::*,
    notices::NoticeResponse,
    state::State,
};

const WELCOME: &str = "ثبت‌نام با موفقیت انجام شد. به فروشگاه خوش آمدید.";

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    /// Also used as the username
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Registration {
            email: request.email,
            password: request.password,
            password_confirmation: request.password_confirmation,
        }
    }
}

/// Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub user: UserResponse,
    pub notices: Vec<NoticeResponse>,
}

/// Register Handler
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid email or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisteredResponse {
        user: user.into(),
        notices: vec![Notice::success(WELCOME).into()],
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::accounts::{AccountsServiceError, models::User};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("accounts/register").post(handler))
    }

    #[tokio::test]
    async fn test_register_creates_account() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_register()
            .once()
            .withf(|registration| registration.email == "sara@example.com")
            .return_once(|registration| {
                Ok(User {
                    uuid: TEST_USER_UUID,
                    username: registration.email.clone(),
                    email: registration.email,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/accounts/register")
            .json(&json!({
                "email": "sara@example.com",
                "password": "correct-horse-battery",
                "password_confirmation": "correct-horse-battery",
            }))
            .send(&make_service(mocks))
            .await;

        let body: RegisteredResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.user.username, "sara@example.com");
        assert_eq!(body.notices[0].message, WELCOME);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/accounts/register")
            .json(&json!({
                "email": "sara@example.com",
                "password": "correct-horse-battery",
                "password_confirmation": "correct-horse-battery",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_password_mismatch_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::PasswordMismatch));

        let res = TestClient::post("http://example.com/accounts/register")
            .json(&json!({
                "email": "sara@example.com",
                "password": "correct-horse-battery",
                "password_confirmation": "battery-horse-correct",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
