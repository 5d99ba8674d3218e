//! Cart Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::models::CartProduct,
    catalog::models::ProductUuid,
    columns::{try_get_amount, try_get_count},
};

const FIND_CART_PRODUCTS_SQL: &str = include_str!("../sql/find_cart_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartProductsRepository;

impl PgCartProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Live catalog data for `products`, ordered by name. Unknown products are omitted.
    pub(crate) async fn find_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<CartProduct>, sqlx::Error> {
        query_as::<Postgres, CartProduct>(FIND_CART_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<CartProduct>, sqlx::Error> {
        let mut found = self.find_products(tx, &[product.into_uuid()]).await?;

        Ok(found.pop())
    }
}

impl<'r> FromRow<'r, PgRow> for CartProduct {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
            is_available: row.try_get("is_available")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
