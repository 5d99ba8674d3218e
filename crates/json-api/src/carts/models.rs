//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::models::{CartLineDetails, CartView};

use crate::notices::{NoticeResponse, into_responses};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product: Uuid,
    pub name: String,
    pub slug: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,

    /// Units left in stock
    pub stock: u32,
}

impl From<CartLineDetails> for CartLineResponse {
    fn from(details: CartLineDetails) -> Self {
        Self {
            line_total: details.line.line_total(),
            product: details.line.product,
            name: details.line.name,
            slug: details.slug,
            unit_price: details.line.unit_price,
            quantity: details.line.quantity,
            stock: details.stock,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Purchasable lines only
    pub lines: Vec<CartLineResponse>,
    pub subtotal: u64,
    pub discount_amount: u64,
    pub total_payable: u64,

    /// Product a product-scoped code discounted
    pub discounted_product: Option<Uuid>,

    /// Applied discount code, if any
    pub discount_code: Option<String>,
    pub notices: Vec<NoticeResponse>,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            lines: view.lines.into_iter().map(Into::into).collect(),
            subtotal: view.totals.subtotal,
            discount_amount: view.totals.discount_amount,
            total_payable: view.totals.total_payable,
            discounted_product: view.totals.discounted_product,
            discount_code: view.discount_code,
            notices: into_responses(view.notices),
        }
    }
}
