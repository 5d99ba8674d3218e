//! Discount Models

use bazaar::{
    discounts::{DefinitionError, DiscountKind, DiscountRule, DiscountScope, normalize_code},
    money::Toman,
};
use jiff::Timestamp;

use crate::{domain::catalog::models::ProductUuid, uuids::TypedUuid};

/// Discount Code UUID
pub type DiscountCodeUuid = TypedUuid<DiscountCode>;

/// A stored discount code.
#[derive(Debug, Clone)]
pub struct DiscountCode {
    pub uuid: DiscountCodeUuid,
    pub rule: DiscountRule,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DiscountCode {
    #[must_use]
    pub fn code(&self) -> &str {
        &self.rule.code
    }
}

/// Target of a new code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewDiscountScope {
    Cart,
    Product(ProductUuid),
}

impl NewDiscountScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Product(_) => "product",
        }
    }

    #[must_use]
    pub const fn product(self) -> Option<ProductUuid> {
        match self {
            Self::Cart => None,
            Self::Product(product) => Some(product),
        }
    }
}

/// New Discount Code Model
#[derive(Debug, Clone)]
pub struct NewDiscountCode {
    pub uuid: DiscountCodeUuid,
    pub code: String,
    pub kind: DiscountKind,
    pub scope: NewDiscountScope,
    pub value: u64,
    pub max_discount_amount: Option<u64>,
    pub min_order_amount: u64,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub usage_limit_total: Option<u32>,
    pub usage_limit_per_user: Option<u32>,
    pub is_active: bool,
}

impl NewDiscountCode {
    /// The rule this code will be stored as, with its code normalized.
    ///
    /// # Errors
    ///
    /// Returns the first definition invariant the code breaks.
    pub fn to_rule(&self, product_name: Option<String>) -> Result<DiscountRule, DefinitionError> {
        let product = self.scope.product().map(ProductUuid::into_uuid);

        let rule = DiscountRule {
            code: normalize_code(&self.code),
            kind: self.kind,
            scope: DiscountScope::from_parts(self.scope.as_str(), product.zip(product_name))?,
            value: self.value,
            max_discount_amount: self.max_discount_amount,
            min_order_amount: self.min_order_amount,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            usage_limit_total: self.usage_limit_total,
            usage_limit_per_user: self.usage_limit_per_user,
            used_count: 0,
            is_active: self.is_active,
        };

        rule.check()?;

        Ok(rule)
    }
}

/// Result of applying a code to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDiscount {
    pub code: String,
    pub amount: u64,

    /// Discounted product name, for product-scoped codes.
    pub product_name: Option<String>,
}

impl AppliedDiscount {
    /// Confirmation shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        let amount = Toman(self.amount);

        match &self.product_name {
            Some(name) => format!(
                "کد تخفیف «{}» اعمال شد. {amount} تومان تخفیف برای «{name}» دریافت کردید.",
                self.code
            ),
            None => format!(
                "کد تخفیف «{}» اعمال شد. {amount} تومان تخفیف دریافت کردید.",
                self.code
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn new_code(code: &str, scope: NewDiscountScope) -> NewDiscountCode {
        NewDiscountCode {
            uuid: DiscountCodeUuid::new(),
            code: code.to_string(),
            kind: DiscountKind::Percent,
            scope,
            value: 10,
            max_discount_amount: None,
            min_order_amount: 0,
            starts_at: None,
            ends_at: None,
            usage_limit_total: None,
            usage_limit_per_user: None,
            is_active: true,
        }
    }

    #[test]
    fn to_rule_normalizes_code() -> TestResult {
        let rule = new_code("  save10 ", NewDiscountScope::Cart).to_rule(None)?;

        assert_eq!(rule.code, "SAVE10");
        assert_eq!(rule.scope, DiscountScope::Cart);

        Ok(())
    }

    #[test]
    fn product_scope_without_name_is_rejected() {
        let product = ProductUuid::from_uuid(Uuid::now_v7());

        let result = new_code("SHOES", NewDiscountScope::Product(product)).to_rule(None);

        assert_eq!(result, Err(DefinitionError::MissingProduct));
    }

    #[test]
    fn percent_over_hundred_is_rejected() {
        let result = NewDiscountCode {
            value: 150,
            ..new_code("BIG", NewDiscountScope::Cart)
        }
        .to_rule(None);

        assert_eq!(result, Err(DefinitionError::PercentOverHundred));
    }

    #[test]
    fn message_names_product_for_product_scope() {
        let applied = AppliedDiscount {
            code: "SHOES".to_string(),
            amount: 15_000,
            product_name: Some("کفش".to_string()),
        };

        assert_eq!(
            applied.message(),
            "کد تخفیف «SHOES» اعمال شد. 15,000 تومان تخفیف برای «کفش» دریافت کردید."
        );
    }
}
