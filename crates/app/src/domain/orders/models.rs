//! Order Models

use bazaar::orders::{DeliveryDetails, OrderStatus};
use jiff::Timestamp;

use crate::{
    domain::{
        accounts::models::UserUuid, catalog::models::ProductUuid,
        discounts::models::DiscountCodeUuid,
    },
    notices::Notice,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Model
///
/// Amounts and delivery details are frozen at checkout; only `status` changes afterwards.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub delivery: DeliveryDetails,
    pub subtotal: u64,
    pub discount_code_uuid: Option<DiscountCodeUuid>,

    /// Code text, while the code still exists.
    pub discount_code: Option<String>,
    pub discount_amount: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order: OrderUuid,

    /// Cleared when the product is deleted.
    pub product: Option<ProductUuid>,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
    pub line_total: u64,
}

/// A placed order plus what the shopper should be told about it.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub notices: Vec<Notice>,
}
