//! Contact Message Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::domain::content::models::{ContactMessage, NewContactMessage};

use crate::{
    content::errors::into_status_error, extensions::*, notices::NoticeResponse, state::State,
};

/// Contact Message Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactMessageRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl From<ContactMessageRequest> for NewContactMessage {
    fn from(request: ContactMessageRequest) -> Self {
        NewContactMessage {
            name: request.name,
            email: request.email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
        }
    }
}

/// Message Received Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageReceivedResponse {
    pub notices: Vec<NoticeResponse>,
}

/// Contact Message Handler
///
/// Stores the message unread for operators.
#[endpoint(
    tags("content"),
    summary = "Send Contact Message",
    responses(
        (status_code = StatusCode::CREATED, description = "Message stored"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Missing field or malformed email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ContactMessageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageReceivedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .content
        .submit_message(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageReceivedResponse {
        notices: vec![ContactMessage::receipt().into()],
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::domain::content::{ContentServiceError, models::ContactMessageUuid};

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("contact/messages").post(handler))
    }

    #[tokio::test]
    async fn test_message_is_acknowledged() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .content
            .expect_submit_message()
            .once()
            .withf(|message| message.subject.is_none() && message.name == "Maryam")
            .return_once(|message| {
                Ok(ContactMessage {
                    uuid: ContactMessageUuid::new(),
                    name: message.name,
                    email: message.email,
                    phone: message.phone,
                    subject: message.subject,
                    message: message.message,
                    is_read: false,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/contact/messages")
            .json(&json!({
                "name": "Maryam",
                "email": "maryam@example.com",
                "message": "Where is my parcel?",
            }))
            .send(&make_service(mocks))
            .await;

        let body: MessageReceivedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.notices[0].message, ContactMessage::receipt().message);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_message_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .content
            .expect_submit_message()
            .once()
            .return_once(|_| Err(ContentServiceError::InvalidMessage));

        let res = TestClient::post("http://example.com/contact/messages")
            .json(&json!({ "name": "", "email": "nope", "message": "" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
