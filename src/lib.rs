//! Bazaar
//!
//! Storefront rules for the Bazaar shop: discount code definitions, validation and settlement
//! arithmetic, cart value objects, order lifecycle, catalog paging and menu resolution.
//!
//! Everything here is pure. Persistence and transport live in `bazaar-app` and `bazaar-json`.

pub mod carts;
pub mod catalog;
pub mod discounts;
pub mod menu;
pub mod money;
pub mod orders;
pub mod prelude;
