//! Carts
//!
//! [`SessionCart`] is the product → quantity mapping a shopper edits during a session.
//! [`CartLine`] is a priced view of one entry against the live catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Per-line ceiling used when a product reports no stock figure.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product on this line.
    pub product: Uuid,

    /// Product name at pricing time.
    pub name: String,

    /// Unit price in tomans.
    pub unit_price: u64,

    /// Quantity, always at least one.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Sum of line totals.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .map(CartLine::line_total)
        .fold(0, u64::saturating_add)
}

/// The session-held cart: product → quantity, never holding a zero quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCart {
    items: BTreeMap<Uuid, u32>,
}

impl SessionCart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for `product`, zero when absent.
    #[must_use]
    pub fn quantity(&self, product: Uuid) -> u32 {
        self.items.get(&product).copied().unwrap_or_default()
    }

    /// Set the quantity for `product`; zero removes the entry.
    pub fn set(&mut self, product: Uuid, quantity: u32) {
        if quantity == 0 {
            self.items.remove(&product);
        } else {
            self.items.insert(product, quantity);
        }
    }

    /// Remove `product`, returning whether it was present.
    pub fn remove(&mut self, product: Uuid) -> bool {
        self.items.remove(&product).is_some()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries ordered by product.
    pub fn iter(&self) -> impl Iterator<Item = (Uuid, u32)> + '_ {
        self.items.iter().map(|(product, quantity)| (*product, *quantity))
    }

    /// Products held, ordered.
    #[must_use]
    pub fn products(&self) -> Vec<Uuid> {
        self.items.keys().copied().collect()
    }

    /// Merge persisted entries into this cart, keeping the larger quantity per product.
    pub fn merge_max(&mut self, persisted: impl IntoIterator<Item = (Uuid, u32)>) {
        for (product, quantity) in persisted {
            if quantity == 0 {
                continue;
            }

            let entry = self.items.entry(product).or_default();
            *entry = (*entry).max(quantity);
        }
    }
}

impl FromIterator<(Uuid, u32)> for SessionCart {
    fn from_iter<I: IntoIterator<Item = (Uuid, u32)>>(iter: I) -> Self {
        let mut cart = Self::new();

        for (product, quantity) in iter {
            cart.set(product, quantity);
        }

        cart
    }
}

/// Why a product cannot be added to the cart.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StockError {
    /// Nothing in stock at all.
    #[error("product is out of stock")]
    OutOfStock,

    /// The cart already holds everything that is in stock.
    #[error("cart already holds all available stock")]
    Exhausted,
}

/// Result of planning an addition against stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addition {
    /// Units actually added.
    pub added: u32,

    /// Line quantity after the addition.
    pub quantity: u32,

    /// Set when the request was cut down to what stock allows.
    pub limited: bool,
}

/// Highest quantity a line may hold for a product with `stock` units.
#[must_use]
pub const fn quantity_cap(stock: u32) -> u32 {
    if stock == 0 { MAX_LINE_QUANTITY } else { stock }
}

/// Plan adding `requested` units of a product with `stock` units to a line already holding
/// `current`.
///
/// The request is clamped to `[1, quantity_cap(stock)]`; when the line would then exceed stock
/// only the remaining stock is added and the addition is flagged as limited.
///
/// # Errors
///
/// [`StockError::OutOfStock`] when `stock` is zero, [`StockError::Exhausted`] when the line
/// already holds all of it.
pub fn plan_addition(requested: u32, current: u32, stock: u32) -> Result<Addition, StockError> {
    if stock == 0 {
        return Err(StockError::OutOfStock);
    }

    let added = requested.clamp(1, quantity_cap(stock));

    if current.saturating_add(added) <= stock {
        return Ok(Addition {
            added,
            quantity: current.saturating_add(added),
            limited: false,
        });
    }

    match stock.checked_sub(current) {
        Some(available) if available > 0 => Ok(Addition {
            added: available,
            quantity: stock,
            limited: true,
        }),
        _ => Err(StockError::Exhausted),
    }
}

/// Quantity a line holds after the shopper edits it to `requested` (at least one).
#[must_use]
pub fn clamp_update(requested: u32, stock: u32) -> u32 {
    requested.min(quantity_cap(stock))
}
