//! Orders Repository

use std::collections::HashMap;

use bazaar::{
    carts::CartLine,
    discounts::CartTotals,
    orders::{DeliveryDetails, OrderStatus, StockAfterSale},
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::ProductUuid,
    columns::{amount_param, count_param, try_get_amount, try_get_count},
    discounts::models::DiscountCodeUuid,
    orders::models::{Order, OrderItem, OrderItemUuid, OrderUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LOCK_PRODUCT_STOCK_SQL: &str = include_str!("sql/lock_product_stock.sql");
const UPDATE_PRODUCT_STOCK_SQL: &str = include_str!("sql/update_product_stock.sql");

/// Values frozen onto a new order.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub order_number: &'a str,
    pub delivery: &'a DeliveryDetails,
    pub totals: CartTotals,
    pub discount_code: Option<DiscountCodeUuid>,
}

/// A product row held for a stock change.
#[derive(Debug, Clone)]
pub(crate) struct LockedStock {
    pub name: String,
    pub stock: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderInsert<'_>,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.order_number)
            .bind(&order.delivery.full_name)
            .bind(&order.delivery.phone)
            .bind(&order.delivery.email)
            .bind(&order.delivery.address)
            .bind(&order.delivery.postal_code)
            .bind(&order.delivery.city)
            .bind(amount_param(order.totals.subtotal, "subtotal")?)
            .bind(order.discount_code.map(DiscountCodeUuid::into_uuid))
            .bind(amount_param(order.totals.discount_amount, "discount_amount")?)
            .bind(amount_param(order.totals.total_payable, "total")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &CartLine,
    ) -> Result<OrderItem, sqlx::Error> {
        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.product)
            .bind(&line.name)
            .bind(count_param(line.quantity, "quantity")?)
            .bind(amount_param(line.unit_price, "price")?)
            .bind(amount_param(line.line_total(), "line_total")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut order = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.list_items(tx, &[order.uuid]).await?;

        Ok(order)
    }

    /// Load an order with its items and hold the order row lock.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut order = query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        order.items = self.list_items(tx, &[order.uuid]).await?;

        Ok(order)
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let mut orders = query_as::<Postgres, Order>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let uuids: Vec<_> = orders.iter().map(|order| order.uuid).collect();

        let mut items: HashMap<OrderUuid, Vec<OrderItem>> = HashMap::new();

        for item in self.list_items(tx, &uuids).await? {
            items.entry(item.order).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        let mut updated = query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        updated.items = self.list_items(tx, &[updated.uuid]).await?;

        Ok(updated)
    }

    async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn lock_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<LockedStock>, sqlx::Error> {
        let row = query(LOCK_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(LockedStock {
                name: row.try_get("name")?,
                stock: try_get_count(&row, "stock")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn update_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        after: StockAfterSale,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PRODUCT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(count_param(after.remaining, "stock")?)
            .bind(after.is_available)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_number: row.try_get("order_number")?,
            status: status
                .parse()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "status".to_string(),
                    source: Box::new(e),
                })?,
            delivery: DeliveryDetails {
                full_name: row.try_get("full_name")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
                address: row.try_get("address")?,
                postal_code: row.try_get("postal_code")?,
                city: row.try_get("city")?,
            },
            subtotal: try_get_amount(row, "subtotal")?,
            discount_code_uuid: row
                .try_get::<Option<Uuid>, _>("discount_code_uuid")?
                .map(DiscountCodeUuid::from_uuid),
            discount_code: row.try_get("discount_code")?,
            discount_amount: try_get_amount(row, "discount_amount")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            tax: try_get_amount(row, "tax")?,
            total: try_get_amount(row, "total")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product: row
                .try_get::<Option<Uuid>, _>("product_uuid")?
                .map(ProductUuid::from_uuid),
            product_name: row.try_get("product_name")?,
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
