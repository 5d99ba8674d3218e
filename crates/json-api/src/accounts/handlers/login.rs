//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar::carts::SessionCart;
use bazaar_app::notices::Notice;

use crate::{
    accounts::errors::into_status_error, extensions::*, notices::NoticeResponse, state::State,
};

const SIGNED_IN: &str = "با موفقیت وارد شدید.";

/// One line of the cart built before signing in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GuestCartItem {
    pub product: Uuid,
    pub quantity: u32,
}

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Email, or username when it has no `@`
    pub identifier: String,
    pub password: String,

    /// Merged with the account's saved cart
    #[serde(default)]
    pub cart: Vec<GuestCartItem>,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for the new session
    pub token: String,
    pub expires_at: String,
    pub notices: Vec<NoticeResponse>,
}

/// Login Handler
#[endpoint(
    tags("accounts"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Session opened"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Wrong identifier or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let guest_cart: SessionCart = request
        .cart
        .into_iter()
        .map(|item| (item.product, item.quantity))
        .collect();

    let issued = state
        .app
        .accounts
        .login(&request.identifier, &request.password, guest_cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.session.expires_at.to_string(),
        notices: vec![Notice::success(SIGNED_IN).into()],
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::{
        auth::{IssuedSession, Session, SessionUuid},
        domain::accounts::AccountsServiceError,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("accounts/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_passes_guest_cart_and_returns_token() -> TestResult {
        let product = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .withf(move |identifier, password, cart| {
                identifier == "sara@example.com"
                    && password == "correct-horse-battery"
                    && cart.quantity(product) == 2
            })
            .return_once(|_, _, cart| {
                Ok(IssuedSession {
                    token: "bz_v1_token".to_string(),
                    session: Session {
                        uuid: SessionUuid::new(),
                        user: TEST_USER_UUID,
                        cart,
                        discount_code: None,
                        created_at: Timestamp::UNIX_EPOCH,
                        updated_at: Timestamp::UNIX_EPOCH,
                        expires_at: Timestamp::UNIX_EPOCH,
                    },
                })
            });

        let body: LoginResponse = TestClient::post("http://example.com/accounts/login")
            .json(&json!({
                "identifier": "sara@example.com",
                "password": "correct-horse-battery",
                "cart": [{ "product": product, "quantity": 2 }],
            }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.token, "bz_v1_token");
        assert_eq!(body.notices[0].message, SIGNED_IN);

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials_return_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_login()
            .once()
            .return_once(|_, _, _| Err(AccountsServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/accounts/login")
            .json(&json!({ "identifier": "sara", "password": "nope" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
