//! Orders service.

use async_trait::async_trait;
use bazaar::{
    carts::SessionCart,
    discounts::CartTotals,
    orders::{OrderStatus, order_number, sell_from_stock},
};
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{PgSessionsRepository, SessionIdentity},
    database::Db,
    domain::{
        accounts::{models::UserUuid, repository::PgAccountsRepository},
        carts::{
            models::bare_lines,
            repositories::{PgCartItemsRepository, PgCartProductsRepository},
            service::load_lines,
        },
        discounts::{
            redemption::{CodeLock, DiscountCheck, check_code},
            repository::PgDiscountCodesRepository,
        },
        orders::{
            errors::OrdersServiceError,
            models::{CheckoutOutcome, Order, OrderUuid},
            repository::{OrderInsert, PgOrdersRepository},
        },
    },
    notices::Notice,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    sessions: PgSessionsRepository,
    accounts: PgAccountsRepository,
    cart_items: PgCartItemsRepository,
    cart_products: PgCartProductsRepository,
    discounts: PgDiscountCodesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            sessions: PgSessionsRepository::new(),
            accounts: PgAccountsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            cart_products: PgCartProductsRepository::new(),
            discounts: PgDiscountCodesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[instrument(skip(self), fields(session = %identity.session))]
    async fn checkout(
        &self,
        identity: SessionIdentity,
    ) -> Result<CheckoutOutcome, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        let lines = bare_lines(&load_lines(&self.cart_products, &mut tx, &session.cart).await?);

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let delivery = self
            .accounts
            .get_profile(&mut tx, session.user)
            .await?
            .delivery_details();

        if !delivery.is_complete() {
            return Err(OrdersServiceError::IncompleteProfile);
        }

        let mut notices = Vec::new();

        let discount = match &session.discount_code {
            Some(code) => {
                let check = check_code(
                    &self.discounts,
                    &mut tx,
                    code,
                    &lines,
                    session.user,
                    Timestamp::now(),
                    CodeLock::ForUpdate,
                )
                .await?;

                match check {
                    DiscountCheck::Accepted(accepted) => Some(accepted),
                    DiscountCheck::Rejected(rejection) => {
                        info!(%code, reason = %rejection, "dropping discount code at checkout");

                        notices.push(Notice::warning(format!(
                            "کد تخفیف «{code}» دیگر معتبر نیست و از سبد حذف شد."
                        )));

                        None
                    }
                }
            }
            None => None,
        };

        let totals = CartTotals::compute(&lines, discount.as_ref().map(|code| &code.rule));
        let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
        let number = order_number(today, Uuid::new_v4());

        let mut order = self
            .repository
            .create_order(
                &mut tx,
                OrderInsert {
                    uuid: OrderUuid::new(),
                    user: session.user,
                    order_number: &number,
                    delivery: &delivery,
                    totals,
                    discount_code: discount.as_ref().map(|code| code.uuid),
                },
            )
            .await?;

        for line in &lines {
            let item = self
                .repository
                .create_order_item(&mut tx, order.uuid, line)
                .await?;

            order.items.push(item);
        }

        if let Some(code) = &discount {
            self.discounts.increment_usage(&mut tx, code.uuid).await?;
        }

        let emptied = SessionCart::new();

        self.sessions
            .save_session_state(&mut tx, session.uuid, &emptied, None)
            .await?;

        self.cart_items
            .replace_items(&mut tx, session.user, &emptied)
            .await?;

        tx.commit().await?;

        info!(order = %order.order_number, total = order.total, "order placed");

        notices.push(Notice::success(
            "سفارش با موفقیت ثبت شد. لطفاً پرداخت را انجام دهید.",
        ));

        Ok(CheckoutOutcome { order, notices })
    }

    #[instrument(skip(self))]
    async fn confirm_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.lock_order(&mut tx, order).await?;

        if order.user != user {
            return Err(OrdersServiceError::Forbidden);
        }

        if !order.status.accepts_payment() {
            return Err(OrdersServiceError::NotPayable);
        }

        let mut items = order.items.clone();
        items.sort_by_key(|item| item.product);

        for item in &items {
            let shortfall = || OrdersServiceError::InsufficientStock {
                name: item.product_name.clone(),
            };

            let product = item.product.ok_or_else(shortfall)?;

            let locked = self
                .repository
                .lock_product_stock(&mut tx, product)
                .await?
                .ok_or_else(shortfall)?;

            let Some(after) = sell_from_stock(locked.stock, item.quantity) else {
                warn!(
                    product = %product,
                    stock = locked.stock,
                    wanted = item.quantity,
                    "insufficient stock"
                );

                return Err(OrdersServiceError::InsufficientStock { name: locked.name });
            };

            self.repository
                .update_product_stock(&mut tx, product, after)
                .await?;
        }

        let paid = self
            .repository
            .update_status(&mut tx, order.uuid, OrderStatus::Paid)
            .await?;

        tx.commit().await?;

        info!(order = %paid.order_number, "payment confirmed");

        Ok(paid)
    }

    #[instrument(skip(self))]
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if order.user != user {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.lock_order(&mut tx, order).await?;

        if order.user != user {
            return Err(OrdersServiceError::Forbidden);
        }

        if !order.status.is_cancellable() {
            return Err(OrdersServiceError::NotCancellable);
        }

        let cancelled = self
            .repository
            .update_status(&mut tx, order.uuid, OrderStatus::Cancelled)
            .await?;

        tx.commit().await?;

        Ok(cancelled)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the session cart and code into a pending order and empty the cart.
    async fn checkout(
        &self,
        identity: SessionIdentity,
    ) -> Result<CheckoutOutcome, OrdersServiceError>;

    /// Take payment for a pending order, selling its items from stock.
    ///
    /// Either every item is sold and the order becomes paid, or nothing changes.
    async fn confirm_payment(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// A single order owned by `user`.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Orders placed by `user`, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;
}
