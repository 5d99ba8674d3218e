//! Discount Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::discounts::DiscountsServiceError;

use crate::observability::{StorefrontEvent, record_event};

pub(crate) fn into_status_error(error: DiscountsServiceError) -> StatusError {
    match error {
        DiscountsServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        DiscountsServiceError::AlreadyExists => StatusError::conflict().brief(error.to_string()),
        DiscountsServiceError::InvalidReference
        | DiscountsServiceError::MissingRequiredData
        | DiscountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid discount payload")
        }
        DiscountsServiceError::Rejected(rejection) => {
            record_event(StorefrontEvent::DiscountRejected);

            StatusError::unprocessable_entity().brief(rejection.to_string())
        }
        error @ (DiscountsServiceError::Definition(_) | DiscountsServiceError::EmptyCart) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        DiscountsServiceError::Sql(source) => {
            error!("discount storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
