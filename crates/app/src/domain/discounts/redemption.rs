//! Checking a session's code against its cart.

use bazaar::{
    carts::CartLine,
    discounts::{DiscountRejection, validate},
};
use jiff::Timestamp;
use sqlx::{Postgres, Transaction};

use crate::domain::{
    accounts::models::UserUuid,
    discounts::{models::DiscountCode, repository::PgDiscountCodesRepository},
};

/// Outcome of checking a code.
#[derive(Debug, Clone)]
pub(crate) enum DiscountCheck {
    Accepted(DiscountCode),
    Rejected(DiscountRejection),
}

/// Whether the code row should stay locked for the rest of the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeLock {
    None,
    ForUpdate,
}

/// Look `code` up and validate it for `user` against `lines` at `now`.
pub(crate) async fn check_code(
    repository: &PgDiscountCodesRepository,
    tx: &mut Transaction<'_, Postgres>,
    code: &str,
    lines: &[CartLine],
    user: UserUuid,
    now: Timestamp,
    lock: CodeLock,
) -> Result<DiscountCheck, sqlx::Error> {
    let found = match lock {
        CodeLock::None => repository.find_by_code(tx, code).await?,
        CodeLock::ForUpdate => repository.lock_by_code(tx, code).await?,
    };

    let redemptions = match &found {
        Some(found) => {
            repository
                .count_user_redemptions(tx, found.uuid, user)
                .await?
        }
        None => 0,
    };

    let verdict = validate(found.as_ref().map(|found| &found.rule), lines, redemptions, now)
        .map(|_rule| ());

    let check = match (verdict, found) {
        (Ok(()), Some(found)) => DiscountCheck::Accepted(found),
        (Ok(()), None) => DiscountCheck::Rejected(DiscountRejection::NotFound),
        (Err(rejection), _) => DiscountCheck::Rejected(rejection),
    };

    Ok(check)
}
