//! Cart Items Repository
//!
//! Persisted cart rows outlive sessions; they are read on login and overwritten from the
//! session cart on every mutation and on logout.

use bazaar::carts::SessionCart;
use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    columns::{count_param, try_get_count},
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const DELETE_STALE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_stale_cart_items.sql");
const UPSERT_CART_ITEMS_SQL: &str = include_str!("../sql/upsert_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<SessionCart, sqlx::Error> {
        let rows = query(LIST_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<Uuid, _>("product_uuid")?,
                    try_get_count(row, "quantity")?,
                ))
            })
            .collect()
    }

    /// Make the stored rows mirror `cart`: rows for products no longer held are deleted, the
    /// rest are upserted. Products that no longer exist are skipped.
    pub(crate) async fn replace_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        cart: &SessionCart,
    ) -> Result<(), sqlx::Error> {
        let products = cart.products();

        query(DELETE_STALE_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(&products)
            .execute(&mut **tx)
            .await?;

        if cart.is_empty() {
            return Ok(());
        }

        let quantities = cart
            .iter()
            .map(|(_product, quantity)| count_param(quantity, "quantity"))
            .collect::<Result<Vec<_>, _>>()?;

        query(UPSERT_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(&products)
            .bind(&quantities)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Load the persisted rows for `user` and fold them into `cart`, keeping the larger
    /// quantity per product.
    pub(crate) async fn merge_into(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        cart: &mut SessionCart,
    ) -> Result<(), sqlx::Error> {
        let persisted = self.list_items(tx, user).await?;

        cart.merge_max(persisted.iter());

        Ok(())
    }
}
