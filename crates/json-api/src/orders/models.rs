//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::orders::models::{Order, OrderItem};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// Missing once the product has been deleted
    pub product: Option<Uuid>,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
    pub line_total: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product: item.product.map(Into::into),
            product_name: item.product_name,
            quantity: item.quantity,
            price: item.price,
            line_total: item.line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryResponse {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,

    /// `pending`, `paid`, `processing`, `shipped`, `delivered` or `cancelled`
    pub status: String,

    /// Persian status label
    pub status_label: String,
    pub delivery: DeliveryResponse,
    pub subtotal: u64,
    pub discount_code: Option<String>,
    pub discount_amount: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            status: order.status.as_str().to_string(),
            status_label: order.status.label().to_string(),
            delivery: DeliveryResponse {
                full_name: order.delivery.full_name,
                phone: order.delivery.phone,
                email: order.delivery.email,
                address: order.delivery.address,
                postal_code: order.delivery.postal_code,
                city: order.delivery.city,
            },
            subtotal: order.subtotal,
            discount_code: order.discount_code,
            discount_amount: order.discount_amount,
            shipping_cost: order.shipping_cost,
            tax: order.tax,
            total: order.total,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
