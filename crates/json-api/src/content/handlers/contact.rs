//! Contact Info Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    content::{errors::into_status_error, models::ContactInfoResponse},
    extensions::*,
    state::State,
};

/// Contact Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    /// Missing until an operator activates a record
    pub info: Option<ContactInfoResponse>,
}

/// Contact Info Handler
#[endpoint(tags("content"), summary = "Contact Details")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ContactResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let info = state
        .app
        .content
        .contact_info()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ContactResponse {
        info: info.map(Into::into),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar_app::domain::content::models::{ContactInfo, ContactInfoUuid};

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("contact").get(handler))
    }

    #[tokio::test]
    async fn test_returns_active_record() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.content.expect_contact_info().once().return_once(|| {
            Ok(Some(ContactInfo {
                uuid: ContactInfoUuid::new(),
                office_address: "Tehran, Valiasr St.".to_string(),
                email: "info@example.com".to_string(),
                phone1: "021-00000000".to_string(),
                phone2: None,
                map_embed: String::new(),
                facebook_url: None,
                twitter_url: None,
                instagram_url: Some("https://instagram.com/bazaar".to_string()),
                youtube_url: None,
                pinterest_url: None,
                is_active: true,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }))
        });

        let body: ContactResponse = TestClient::get("http://example.com/contact")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let info = body.info.ok_or("expected contact info")?;

        assert_eq!(info.email, "info@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_no_active_record_is_not_an_error() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .content
            .expect_contact_info()
            .once()
            .return_once(|| Ok(None));

        let mut res = TestClient::get("http://example.com/contact")
            .send(&make_service(mocks))
            .await;

        let body: ContactResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.info.is_none());

        Ok(())
    }
}
