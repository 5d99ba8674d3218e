//! Orders
//!
//! Order status transitions, order numbers, delivery snapshots and stock settlement.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use thiserror::Error;
use uuid::Uuid;

/// Unrecognised status identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(pub String);

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Created at checkout, awaiting payment.
    Pending,

    /// Payment confirmed and stock settled.
    Paid,

    /// Being prepared.
    Processing,

    /// Handed to the carrier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled by the customer or an operator.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Paid,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Shopper-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "در انتظار پرداخت",
            Self::Paid => "پرداخت شده",
            Self::Processing => "در حال پردازش",
            Self::Shipped => "ارسال شده",
            Self::Delivered => "تحویل داده شده",
            Self::Cancelled => "لغو شده",
        }
    }

    /// Whether the customer may still cancel.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Paid | Self::Processing)
    }

    /// Whether payment may be confirmed.
    #[must_use]
    pub const fn accepts_payment(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Order number: `ORD-YYYYMMDD-XXXXXXXX`, the suffix being the first eight hex digits of
/// `entropy`, upper-cased.
#[must_use]
pub fn order_number(date: Date, entropy: Uuid) -> String {
    let suffix: String = entropy
        .simple()
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();

    format!("ORD-{}-{suffix}", date.strftime("%Y%m%d"))
}

/// Delivery details copied onto an order at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    /// Recipient name.
    pub full_name: String,

    /// Contact phone.
    pub phone: String,

    /// Contact email.
    pub email: String,

    /// Street address.
    pub address: String,

    /// Postal code.
    pub postal_code: String,

    /// City.
    pub city: String,
}

impl DeliveryDetails {
    /// Name, phone and address are all present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.full_name, &self.phone, &self.address]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Stock left after selling from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAfterSale {
    /// Units remaining.
    pub remaining: u32,

    /// Whether the product stays purchasable.
    pub is_available: bool,
}

/// Sell `quantity` units from `stock`, or `None` when there is not enough.
#[must_use]
pub fn sell_from_stock(stock: u32, quantity: u32) -> Option<StockAfterSale> {
    let remaining = stock.checked_sub(quantity)?;

    Some(StockAfterSale {
        remaining,
        is_available: remaining > 0,
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_round_trips_through_identifier() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("refunded".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn cancellation_allowed_until_shipping() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Paid.is_cancellable());
        assert!(OrderStatus::Processing.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Delivered.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn order_number_format() -> TestResult {
        let entropy = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000")?;

        assert_eq!(
            order_number(date(2026, 3, 7), entropy),
            "ORD-20260307-A1B2C3D4"
        );

        Ok(())
    }

    #[test]
    fn delivery_requires_name_phone_address() {
        let mut details = DeliveryDetails {
            full_name: "Sara".to_string(),
            phone: "09120000000".to_string(),
            address: "Tehran".to_string(),
            ..DeliveryDetails::default()
        };

        assert!(details.is_complete());

        details.phone = "  ".to_string();

        assert!(!details.is_complete());
    }

    #[test]
    fn selling_marks_unavailable_at_zero() {
        assert_eq!(
            sell_from_stock(5, 2),
            Some(StockAfterSale {
                remaining: 3,
                is_available: true
            })
        );
        assert_eq!(
            sell_from_stock(2, 2),
            Some(StockAfterSale {
                remaining: 0,
                is_available: false
            })
        );
        assert_eq!(sell_from_stock(1, 2), None);
    }
}
