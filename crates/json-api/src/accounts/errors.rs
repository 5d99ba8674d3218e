//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => StatusError::conflict().brief(error.to_string()),
        AccountsServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AccountsServiceError::InvalidReference
        | AccountsServiceError::MissingRequiredData
        | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        error @ (AccountsServiceError::InvalidEmail
        | AccountsServiceError::PasswordTooShort { .. }
        | AccountsServiceError::PasswordMismatch) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        error @ AccountsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief(error.to_string())
        }
        AccountsServiceError::SessionNotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AccountsServiceError::PasswordHash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
