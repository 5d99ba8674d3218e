//! Discount code definitions.

use std::str::FromStr;

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

/// Maximum number of characters in a normalized code.
pub const MAX_CODE_LENGTH: usize = 50;

/// Normalize a code as typed by a shopper or operator: trimmed and upper-cased.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Errors raised when a discount definition breaks one of its invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// Code is blank after normalization.
    #[error("discount code must not be empty")]
    EmptyCode,

    /// Code exceeds [`MAX_CODE_LENGTH`].
    #[error("discount code must be at most {MAX_CODE_LENGTH} characters")]
    CodeTooLong,

    /// Value must be a positive whole amount.
    #[error("discount value must be at least 1")]
    ZeroValue,

    /// Percentages are bounded by 100.
    #[error("a percentage discount cannot exceed 100")]
    PercentOverHundred,

    /// A cap, when present, must be positive.
    #[error("maximum discount amount must be at least 1")]
    ZeroCap,

    /// `ends_at` must fall strictly after `starts_at`.
    #[error("end time must be after start time")]
    InvalidWindow,

    /// Product scope without a product.
    #[error("a product-scoped discount needs a product")]
    MissingProduct,

    /// Unrecognised kind identifier.
    #[error("unknown discount kind {0:?}")]
    UnknownKind(String),

    /// Unrecognised scope identifier.
    #[error("unknown discount scope {0:?}")]
    UnknownScope(String),
}

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// `value` is a percentage of the base.
    Percent,

    /// `value` is a whole toman amount.
    Fixed,
}

impl DiscountKind {
    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountKind {
    type Err = DefinitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percent" => Ok(Self::Percent),
            "fixed" => Ok(Self::Fixed),
            other => Err(DefinitionError::UnknownKind(other.to_string())),
        }
    }
}

/// What a code applies to.
///
/// A product scope always carries its product; a cart scope never does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiscountScope {
    /// Whole-cart subtotal.
    Cart,

    /// A single product line.
    Product {
        /// Target product.
        product: Uuid,

        /// Product name, used in shopper-facing messages.
        name: String,
    },
}

impl DiscountScope {
    /// Build a scope from its stored identifier and optional product.
    ///
    /// A cart scope discards any product it is given.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingProduct`] for a product scope with no product, or
    /// [`DefinitionError::UnknownScope`] for an unrecognised identifier.
    pub fn from_parts(scope: &str, product: Option<(Uuid, String)>) -> Result<Self, DefinitionError> {
        match scope {
            "cart" => Ok(Self::Cart),
            "product" => product
                .map(|(product, name)| Self::Product { product, name })
                .ok_or(DefinitionError::MissingProduct),
            other => Err(DefinitionError::UnknownScope(other.to_string())),
        }
    }

    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Product { .. } => "product",
        }
    }

    /// The targeted product, if any.
    #[must_use]
    pub fn product(&self) -> Option<Uuid> {
        match self {
            Self::Cart => None,
            Self::Product { product, .. } => Some(*product),
        }
    }
}

/// Where a moment falls relative to a code's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Earlier than `starts_at`.
    Before,

    /// Inside the window, bounds included.
    Within,

    /// Later than `ends_at`.
    After,
}

/// A discount code and its redemption rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    /// Normalized code.
    pub code: String,

    /// Percent or fixed.
    pub kind: DiscountKind,

    /// Cart-wide or single product.
    pub scope: DiscountScope,

    /// Percentage (1..=100) or whole toman amount.
    pub value: u64,

    /// Upper bound applied after a percentage is computed.
    pub max_discount_amount: Option<u64>,

    /// Minimum cart subtotal required.
    pub min_order_amount: u64,

    /// Start of the validity window.
    pub starts_at: Option<Timestamp>,

    /// End of the validity window.
    pub ends_at: Option<Timestamp>,

    /// Maximum redemptions across all users.
    pub usage_limit_total: Option<u32>,

    /// Maximum redemptions per user.
    pub usage_limit_per_user: Option<u32>,

    /// Redemptions so far.
    pub used_count: u32,

    /// Operator kill switch.
    pub is_active: bool,
}

impl DiscountRule {
    /// Check the definition invariants.
    ///
    /// # Errors
    ///
    /// Returns the first invariant the rule breaks.
    pub fn check(&self) -> Result<(), DefinitionError> {
        if self.code.is_empty() {
            return Err(DefinitionError::EmptyCode);
        }

        if self.code.chars().count() > MAX_CODE_LENGTH {
            return Err(DefinitionError::CodeTooLong);
        }

        if self.value == 0 {
            return Err(DefinitionError::ZeroValue);
        }

        if self.kind == DiscountKind::Percent && self.value > 100 {
            return Err(DefinitionError::PercentOverHundred);
        }

        if self.max_discount_amount == Some(0) {
            return Err(DefinitionError::ZeroCap);
        }

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at)
            && ends_at <= starts_at
        {
            return Err(DefinitionError::InvalidWindow);
        }

        Ok(())
    }

    /// Where `now` falls relative to the validity window. Both bounds are inclusive.
    #[must_use]
    pub fn window_position(&self, now: Timestamp) -> WindowPosition {
        if self.starts_at.is_some_and(|starts_at| now < starts_at) {
            return WindowPosition::Before;
        }

        if self.ends_at.is_some_and(|ends_at| now > ends_at) {
            return WindowPosition::After;
        }

        WindowPosition::Within
    }

    /// Whether the global redemption cap still has room.
    #[must_use]
    pub fn has_usage_remaining(&self) -> bool {
        self.usage_limit_total
            .is_none_or(|limit| self.used_count < limit)
    }

    /// Whether a user with `redemptions` prior uses may redeem again.
    #[must_use]
    pub fn allows_user(&self, redemptions: u32) -> bool {
        self.usage_limit_per_user
            .is_none_or(|limit| redemptions < limit)
    }
}
