//! Discounts
//!
//! A discount code is admin-authored ([`DiscountRule`]), validated against a cart, a user's prior
//! redemptions and the current time ([`validate`]), and turned into an amount against either the
//! whole cart or a single product line ([`discount_for_cart`]).

mod calculation;
mod definition;
mod validation;

pub use calculation::{CartTotals, DiscountApplication, discount_for_cart, percent_of};
pub use definition::{
    DefinitionError, DiscountKind, DiscountRule, DiscountScope, MAX_CODE_LENGTH, WindowPosition,
    normalize_code,
};
pub use validation::{DiscountRejection, validate};
