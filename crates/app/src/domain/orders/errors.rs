//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("resource already exists")]
    AlreadyExists,

    #[error("سفارش یافت نشد.")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("سبد خرید شما خالی است.")]
    EmptyCart,

    #[error("لطفاً در داشبورد نام، تلفن و آدرس را تکمیل کنید سپس به پرداخت برگردید.")]
    IncompleteProfile,

    #[error("دسترسی مجاز نیست.")]
    Forbidden,

    #[error("این سفارش در انتظار پرداخت نیست.")]
    NotPayable,

    #[error("این سفارش قابل لغو نیست.")]
    NotCancellable,

    #[error("موجودی کافی از «{name}» وجود ندارد.")]
    InsufficientStock { name: String },
}

impl From<Error> for OrdersServiceError {
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
