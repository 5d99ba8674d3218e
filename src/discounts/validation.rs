//! Discount validation against a cart.

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    carts::{CartLine, subtotal},
    money::Toman,
};

use super::definition::{DiscountRule, DiscountScope, WindowPosition};

/// Why a code cannot be redeemed. Messages are shown to shoppers as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscountRejection {
    /// Blank input.
    #[error("لطفاً یک کد تخفیف وارد کنید.")]
    Missing,

    /// No code with that name.
    #[error("کد تخفیف وارد شده معتبر نیست.")]
    NotFound,

    /// Switched off by an operator.
    #[error("این کد تخفیف فعال نیست.")]
    Inactive,

    /// Window has not opened yet.
    #[error("این کد تخفیف هنوز فعال نشده است.")]
    NotStarted,

    /// Window has closed.
    #[error("این کد تخفیف منقضی شده است.")]
    Expired,

    /// Global redemption cap reached.
    #[error("ظرفیت استفاده از این کد تخفیف تمام شده است.")]
    TotalLimitReached,

    /// Per-user redemption cap reached.
    #[error("شما قبلاً از این کد تخفیف استفاده کرده‌اید.")]
    PerUserLimitReached,

    /// Cart subtotal below the threshold.
    #[error("حداقل مبلغ سفارش برای استفاده از این کد {minimum} تومان است.")]
    BelowMinimumOrder {
        /// Required subtotal.
        minimum: Toman,
    },

    /// Product-scoped code whose product is not in the cart.
    #[error("این کد تخفیف فقط برای «{product_name}» معتبر است و آن محصول در سبد شما نیست.")]
    ProductNotInCart {
        /// Target product name.
        product_name: String,
    },
}

/// Validate a looked-up code against cart lines, the acting user's prior redemptions of it and
/// the current time.
///
/// Checks run in a fixed order and stop at the first failure: existence, active flag, start,
/// end, total cap, per-user cap, minimum order, product presence.
///
/// # Errors
///
/// Returns the first [`DiscountRejection`] that applies.
pub fn validate<'r>(
    rule: Option<&'r DiscountRule>,
    lines: &[CartLine],
    user_redemptions: u32,
    now: Timestamp,
) -> Result<&'r DiscountRule, DiscountRejection> {
    let rule = rule.ok_or(DiscountRejection::NotFound)?;

    if !rule.is_active {
        return Err(DiscountRejection::Inactive);
    }

    match rule.window_position(now) {
        WindowPosition::Before => return Err(DiscountRejection::NotStarted),
        WindowPosition::After => return Err(DiscountRejection::Expired),
        WindowPosition::Within => {}
    }

    if !rule.has_usage_remaining() {
        return Err(DiscountRejection::TotalLimitReached);
    }

    if !rule.allows_user(user_redemptions) {
        return Err(DiscountRejection::PerUserLimitReached);
    }

    if subtotal(lines) < rule.min_order_amount {
        return Err(DiscountRejection::BelowMinimumOrder {
            minimum: Toman(rule.min_order_amount),
        });
    }

    if let DiscountScope::Product { product, name } = &rule.scope
        && !lines.iter().any(|line| line.product == *product)
    {
        return Err(DiscountRejection::ProductNotInCart {
            product_name: name.clone(),
        });
    }

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::discounts::DiscountKind;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_second(1_780_000_000).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn cart_rule() -> DiscountRule {
        DiscountRule {
            code: "SAVE10".to_string(),
            kind: DiscountKind::Percent,
            scope: DiscountScope::Cart,
            value: 10,
            max_discount_amount: None,
            min_order_amount: 0,
            starts_at: None,
            ends_at: None,
            usage_limit_total: None,
            usage_limit_per_user: None,
            used_count: 0,
            is_active: true,
        }
    }

    fn lines() -> Vec<CartLine> {
        vec![CartLine {
            product: Uuid::from_u128(1),
            name: "Tee".to_string(),
            unit_price: 100_000,
            quantity: 1,
        }]
    }

    #[test]
    fn accepts_valid_code() -> TestResult {
        let rule = cart_rule();

        let accepted = validate(Some(&rule), &lines(), 0, now())?;

        assert_eq!(accepted.code, "SAVE10");

        Ok(())
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            validate(None, &lines(), 0, now()),
            Err(DiscountRejection::NotFound)
        );
    }

    #[test]
    fn rejects_inactive_before_window_checks() -> TestResult {
        let mut rule = cart_rule();
        rule.is_active = false;
        rule.ends_at = Some(now().checked_sub(jiff::SignedDuration::from_hours(1))?);

        assert_eq!(
            validate(Some(&rule), &lines(), 0, now()),
            Err(DiscountRejection::Inactive)
        );

        Ok(())
    }

    #[test]
    fn rejects_outside_window() -> TestResult {
        let hour = jiff::SignedDuration::from_hours(1);

        let mut early = cart_rule();
        early.starts_at = Some(now().checked_add(hour)?);

        let mut late = cart_rule();
        late.ends_at = Some(now().checked_sub(hour)?);

        assert_eq!(
            validate(Some(&early), &lines(), 0, now()),
            Err(DiscountRejection::NotStarted)
        );
        assert_eq!(
            validate(Some(&late), &lines(), 0, now()),
            Err(DiscountRejection::Expired)
        );

        Ok(())
    }

    #[test]
    fn accepts_at_exact_window_bounds() -> TestResult {
        let mut windowed = cart_rule();
        windowed.starts_at = Some(now());
        windowed.ends_at = Some(now().checked_add(jiff::SignedDuration::from_hours(1))?);

        assert!(validate(Some(&windowed), &lines(), 0, now()).is_ok());

        windowed.starts_at = Some(now().checked_sub(jiff::SignedDuration::from_hours(1))?);
        windowed.ends_at = Some(now());

        assert!(validate(Some(&windowed), &lines(), 0, now()).is_ok());
        assert_eq!(
            validate(
                Some(&windowed),
                &lines(),
                0,
                now().checked_add(jiff::SignedDuration::from_secs(1))?
            ),
            Err(DiscountRejection::Expired)
        );

        Ok(())
    }

    #[test]
    fn total_cap_checked_before_per_user_cap() {
        let mut rule = cart_rule();
        rule.usage_limit_total = Some(1);
        rule.usage_limit_per_user = Some(1);
        rule.used_count = 1;

        assert_eq!(
            validate(Some(&rule), &lines(), 1, now()),
            Err(DiscountRejection::TotalLimitReached)
        );

        rule.usage_limit_total = None;

        assert_eq!(
            validate(Some(&rule), &lines(), 1, now()),
            Err(DiscountRejection::PerUserLimitReached)
        );
    }

    #[test]
    fn rejects_below_minimum_with_formatted_amount() {
        let mut rule = cart_rule();
        rule.min_order_amount = 200_000;

        let rejection = validate(Some(&rule), &lines(), 0, now());

        assert_eq!(
            rejection,
            Err(DiscountRejection::BelowMinimumOrder {
                minimum: Toman(200_000)
            })
        );
        assert_eq!(
            rejection.err().map(|error| error.to_string()),
            Some("حداقل مبلغ سفارش برای استفاده از این کد 200,000 تومان است.".to_string())
        );
    }

    #[test]
    fn product_scope_requires_product_in_cart() -> TestResult {
        let mut rule = cart_rule();
        rule.scope = DiscountScope::Product {
            product: Uuid::from_u128(7),
            name: "Mug".to_string(),
        };

        assert_eq!(
            validate(Some(&rule), &lines(), 0, now()),
            Err(DiscountRejection::ProductNotInCart {
                product_name: "Mug".to_string()
            })
        );

        rule.scope = DiscountScope::Product {
            product: Uuid::from_u128(1),
            name: "Tee".to_string(),
        };

        validate(Some(&rule), &lines(), 0, now())?;

        Ok(())
    }
}
