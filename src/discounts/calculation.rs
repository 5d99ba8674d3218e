//! Discount amounts and cart totals.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use uuid::Uuid;

use crate::carts::{CartLine, subtotal};

use super::definition::{DiscountKind, DiscountRule, DiscountScope};

/// `percent`% of `base`, rounded half-to-even to a whole toman.
#[must_use]
pub fn percent_of(base: u64, percent: u64) -> u64 {
    let applied = Decimal::from(base)
        .checked_mul(Decimal::from(percent))
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED));

    let Some(applied) = applied else {
        return base;
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_u64()
        .unwrap_or(base)
        .min(base)
}

impl DiscountRule {
    /// Discount this rule grants against `base`.
    ///
    /// Percentages are rounded then capped; fixed amounts never exceed the base.
    #[must_use]
    pub fn amount_for(&self, base: u64) -> u64 {
        match self.kind {
            DiscountKind::Percent => {
                let amount = percent_of(base, self.value);

                self.max_discount_amount
                    .map_or(amount, |cap| amount.min(cap))
            }
            DiscountKind::Fixed => self.value.min(base),
        }
    }
}

/// A discount resolved against concrete cart lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountApplication {
    /// Discount granted.
    pub amount: u64,

    /// Amount the discount was computed against.
    pub base: u64,

    /// Discounted product for product-scoped codes.
    pub product: Option<Uuid>,
}

/// Resolve `rule` against `lines`.
///
/// Cart scope uses the subtotal. Product scope uses the matching line's total, or contributes
/// nothing against a zero base when the product is absent.
#[must_use]
pub fn discount_for_cart(rule: &DiscountRule, lines: &[CartLine]) -> DiscountApplication {
    match &rule.scope {
        DiscountScope::Cart => {
            let base = subtotal(lines);

            DiscountApplication {
                amount: rule.amount_for(base),
                base,
                product: None,
            }
        }
        DiscountScope::Product { product, .. } => lines
            .iter()
            .find(|line| line.product == *product)
            .map(|line| {
                let base = line.line_total();

                DiscountApplication {
                    amount: rule.amount_for(base),
                    base,
                    product: Some(*product),
                }
            })
            .unwrap_or_default(),
    }
}

/// Cart totals with an optional discount applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: u64,

    /// Discount granted.
    pub discount_amount: u64,

    /// `max(subtotal - discount_amount, 0)`.
    pub total_payable: u64,

    /// Product the discount was applied to, for product-scoped codes.
    pub discounted_product: Option<Uuid>,
}

impl CartTotals {
    /// Compute totals for `lines`, applying `rule` when given.
    #[must_use]
    pub fn compute(lines: &[CartLine], rule: Option<&DiscountRule>) -> Self {
        let subtotal = subtotal(lines);

        let application = rule
            .map(|rule| discount_for_cart(rule, lines))
            .unwrap_or_default();

        Self {
            subtotal,
            discount_amount: application.amount,
            total_payable: subtotal.saturating_sub(application.amount),
            discounted_product: application.product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: DiscountKind, value: u64) -> DiscountRule {
        DiscountRule {
            code: "TEST".to_string(),
            kind,
            scope: DiscountScope::Cart,
            value,
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

    fn line(product: u128, unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            product: Uuid::from_u128(product),
            name: format!("Product {product}"),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn percent_rounds_half_to_even() {
        assert_eq!(percent_of(12_345, 10), 1_234);
        assert_eq!(percent_of(12_355, 10), 1_236);
        assert_eq!(percent_of(100_000, 10), 10_000);
        assert_eq!(percent_of(0, 50), 0);
    }

    #[test]
    fn percent_respects_cap() {
        let mut capped = rule(DiscountKind::Percent, 30);
        capped.max_discount_amount = Some(15_000);

        assert_eq!(capped.amount_for(100_000), 15_000);
        assert_eq!(capped.amount_for(40_000), 12_000);
    }

    #[test]
    fn fixed_never_exceeds_base() {
        let fixed = rule(DiscountKind::Fixed, 20_000);

        assert_eq!(fixed.amount_for(100_000), 20_000);
        assert_eq!(fixed.amount_for(5_000), 5_000);
    }

    #[test]
    fn cart_scope_uses_subtotal() {
        let save10 = rule(DiscountKind::Percent, 10);
        let lines = [line(1, 60_000, 1), line(2, 20_000, 2)];

        let totals = CartTotals::compute(&lines, Some(&save10));

        assert_eq!(totals.subtotal, 100_000);
        assert_eq!(totals.discount_amount, 10_000);
        assert_eq!(totals.total_payable, 90_000);
        assert_eq!(totals.discounted_product, None);
    }

    #[test]
    fn product_scope_uses_only_matching_line() {
        let mut mug_only = rule(DiscountKind::Percent, 50);
        mug_only.scope = DiscountScope::Product {
            product: Uuid::from_u128(2),
            name: "Mug".to_string(),
        };

        let lines = [line(1, 60_000, 1), line(2, 20_000, 2)];
        let application = discount_for_cart(&mug_only, &lines);

        assert_eq!(application.base, 40_000);
        assert_eq!(application.amount, 20_000);
        assert_eq!(application.product, Some(Uuid::from_u128(2)));
    }

    #[test]
    fn product_scope_without_match_contributes_nothing() {
        let mut mug_only = rule(DiscountKind::Fixed, 5_000);
        mug_only.scope = DiscountScope::Product {
            product: Uuid::from_u128(9),
            name: "Mug".to_string(),
        };

        let lines = [line(1, 60_000, 1)];

        assert_eq!(
            discount_for_cart(&mug_only, &lines),
            DiscountApplication::default()
        );
    }

    #[test]
    fn totals_without_discount() {
        let lines = [line(1, 60_000, 1)];

        let totals = CartTotals::compute(&lines, None);

        assert_eq!(totals.subtotal, 60_000);
        assert_eq!(totals.discount_amount, 0);
        assert_eq!(totals.total_payable, 60_000);
    }
}
