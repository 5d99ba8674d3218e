//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        OrdersServiceError::Forbidden => StatusError::forbidden().brief(error.to_string()),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        error @ (OrdersServiceError::EmptyCart | OrdersServiceError::IncompleteProfile) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        error @ (OrdersServiceError::NotPayable
        | OrdersServiceError::NotCancellable
        | OrdersServiceError::InsufficientStock { .. }) => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
