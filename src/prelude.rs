//! Bazaar prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{Addition, CartLine, SessionCart, StockError, plan_addition, subtotal},
    catalog::{PAGE_SIZE, Page, ProductLabel, ProductSort, Rating, SizeOption},
    discounts::{
        CartTotals, DefinitionError, DiscountApplication, DiscountKind, DiscountRejection,
        DiscountRule, DiscountScope, discount_for_cart, normalize_code, validate,
    },
    menu::{MenuEntry, MenuNode, MenuType, build_menu, resolve_menu_url},
    money::Toman,
    orders::{DeliveryDetails, OrderStatus, StockAfterSale, order_number, sell_from_stock},
};
