//! Content Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::content::ContentServiceError;

pub(crate) fn into_status_error(error: ContentServiceError) -> StatusError {
    match error {
        ContentServiceError::NotFound => StatusError::not_found(),
        ContentServiceError::AlreadyExists => StatusError::conflict().brief("Already exists"),
        ContentServiceError::InvalidReference
        | ContentServiceError::MissingRequiredData
        | ContentServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid content payload")
        }
        error @ (ContentServiceError::InvalidMessage
        | ContentServiceError::InvalidMenuOrder { .. }) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        ContentServiceError::Sql(source) => {
            error!("content storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
