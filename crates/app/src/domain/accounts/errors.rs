//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::passwords::PasswordHashError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("این ایمیل قبلاً ثبت شده است.")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("لطفاً یک ایمیل معتبر وارد کنید.")]
    InvalidEmail,

    #[error("رمز عبور باید حداقل {min} کاراکتر باشد.")]
    PasswordTooShort { min: usize },

    #[error("رمز عبور و تکرار آن یکسان نیستند.")]
    PasswordMismatch,

    #[error("ایمیل/نام کاربری یا رمز عبور اشتباه است.")]
    InvalidCredentials,

    #[error("session not found")]
    SessionNotFound,

    #[error("password hashing failed")]
    PasswordHash(#[from] PasswordHashError),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
