//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod invoice;
pub(crate) mod payment;

#[cfg(test)]
pub(crate) mod tests {
    use bazaar::orders::{DeliveryDetails, OrderStatus};
    use bazaar_app::domain::orders::models::{Order, OrderItem, OrderItemUuid, OrderUuid};
    use jiff::Timestamp;

    use crate::test_helpers::TEST_USER_UUID;

    pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> Order {
        Order {
            uuid,
            user: TEST_USER_UUID,
            order_number: "ORD-20260301-1A2B3C4D".to_string(),
            status,
            delivery: DeliveryDetails {
                full_name: "Sara Ahmadi".to_string(),
                phone: "09120000000".to_string(),
                email: "sara@example.com".to_string(),
                address: "Valiasr St. 12".to_string(),
                postal_code: "1234567890".to_string(),
                city: "Tehran".to_string(),
            },
            subtotal: 200_000,
            discount_code_uuid: None,
            discount_code: None,
            discount_amount: 0,
            shipping_cost: 0,
            tax: 0,
            total: 200_000,
            items: vec![OrderItem {
                uuid: OrderItemUuid::new(),
                order: uuid,
                product: None,
                product_name: "Linen Shirt".to_string(),
                quantity: 2,
                price: 100_000,
                line_total: 200_000,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
