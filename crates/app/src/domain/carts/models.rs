//! Cart Models

use bazaar::{
    carts::{CartLine, SessionCart},
    discounts::CartTotals,
};

use crate::{domain::catalog::models::ProductUuid, notices::Notice};

/// Catalog data a cart needs about a product.
#[derive(Debug, Clone)]
pub struct CartProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub price: u64,
    pub stock: u32,
    pub is_available: bool,
    pub is_active: bool,
}

impl CartProduct {
    /// Whether a cart may hold this product.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.is_active && self.is_available
    }
}

/// A priced line plus what the cart page links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineDetails {
    pub line: CartLine,
    pub slug: String,
    pub stock: u32,
}

/// The cart as shown to the shopper.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    pub lines: Vec<CartLineDetails>,
    pub totals: CartTotals,

    /// Code stored on the session, whether or not it currently validates.
    pub discount_code: Option<String>,
    pub notices: Vec<Notice>,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One requested quantity change. Values below one remove the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartQuantity {
    pub product: ProductUuid,
    pub quantity: i64,
}

/// Price the session cart against live products.
///
/// Only products that are active and available, with a positive quantity, produce a line.
#[must_use]
pub fn price_lines(cart: &SessionCart, products: &[CartProduct]) -> Vec<CartLineDetails> {
    products
        .iter()
        .filter(|product| product.is_purchasable())
        .filter_map(|product| {
            let quantity = cart.quantity(product.uuid.into_uuid());

            (quantity > 0).then(|| CartLineDetails {
                line: CartLine {
                    product: product.uuid.into_uuid(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity,
                },
                slug: product.slug.clone(),
                stock: product.stock,
            })
        })
        .collect()
}

/// Bare lines, as the discount rules consume them.
#[must_use]
pub fn bare_lines(lines: &[CartLineDetails]) -> Vec<CartLine> {
    lines.iter().map(|details| details.line.clone()).collect()
}
