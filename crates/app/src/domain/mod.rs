//! Storefront Domain Concerns

pub mod accounts;
pub mod carts;
pub mod catalog;
pub(crate) mod columns;
pub mod content;
pub mod discounts;
pub mod orders;
