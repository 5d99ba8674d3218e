//! Flash-style messages in responses.

use bazaar_app::notices::Notice;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// A message for the shopper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct NoticeResponse {
    /// One of `success`, `info`, `warning`
    pub level: String,

    /// Persian message text
    pub message: String,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            level: notice.level.as_str().to_string(),
            message: notice.message,
        }
    }
}

pub(crate) fn into_responses(notices: Vec<Notice>) -> Vec<NoticeResponse> {
    notices.into_iter().map(NoticeResponse::from).collect()
}
