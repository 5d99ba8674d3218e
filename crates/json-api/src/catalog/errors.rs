//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("محصول مورد نظر یافت نشد."),
        CatalogServiceError::AlreadyExists => StatusError::conflict().brief("Already exists"),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        error @ (CatalogServiceError::InvalidRating(_) | CatalogServiceError::EmptyReview) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
