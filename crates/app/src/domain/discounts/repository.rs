//! Discount Codes Repository

use bazaar::discounts::{DiscountKind, DiscountRule, DiscountScope};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::ProductUuid,
    columns::{
        amount_param, count_param, try_get_amount, try_get_count, try_get_optional_amount,
        try_get_optional_count,
    },
    discounts::models::{DiscountCode, DiscountCodeUuid, NewDiscountCode},
};

const FIND_DISCOUNT_CODE_SQL: &str = include_str!("sql/find_discount_code.sql");
const LOCK_DISCOUNT_CODE_SQL: &str = include_str!("sql/lock_discount_code.sql");
const LIST_DISCOUNT_CODES_SQL: &str = include_str!("sql/list_discount_codes.sql");
const CREATE_DISCOUNT_CODE_SQL: &str = include_str!("sql/create_discount_code.sql");
const DEACTIVATE_DISCOUNT_CODE_SQL: &str = include_str!("sql/deactivate_discount_code.sql");
const INCREMENT_USAGE_SQL: &str = include_str!("sql/increment_usage.sql");
const COUNT_USER_REDEMPTIONS_SQL: &str = include_str!("sql/count_user_redemptions.sql");
const GET_PRODUCT_NAME_SQL: &str = include_str!("sql/get_product_name.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDiscountCodesRepository;

impl PgDiscountCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<DiscountCode>, sqlx::Error> {
        query_as::<Postgres, DiscountCode>(FIND_DISCOUNT_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Like [`Self::find_by_code`], holding the row lock until the transaction ends.
    pub(crate) async fn lock_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<DiscountCode>, sqlx::Error> {
        query_as::<Postgres, DiscountCode>(LOCK_DISCOUNT_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_codes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<DiscountCode>, sqlx::Error> {
        query_as::<Postgres, DiscountCode>(LIST_DISCOUNT_CODES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: DiscountCodeUuid,
        rule: &DiscountRule,
    ) -> Result<DiscountCode, sqlx::Error> {
        query_as::<Postgres, DiscountCode>(CREATE_DISCOUNT_CODE_SQL)
            .bind(uuid.into_uuid())
            .bind(&rule.code)
            .bind(rule.kind.as_str())
            .bind(rule.scope.as_str())
            .bind(rule.scope.product())
            .bind(amount_param(rule.value, "value")?)
            .bind(
                rule.max_discount_amount
                    .map(|cap| amount_param(cap, "max_discount_amount"))
                    .transpose()?,
            )
            .bind(amount_param(rule.min_order_amount, "min_order_amount")?)
            .bind(rule.starts_at.map(SqlxTimestamp::from))
            .bind(rule.ends_at.map(SqlxTimestamp::from))
            .bind(
                rule.usage_limit_total
                    .map(|limit| count_param(limit, "usage_limit_total"))
                    .transpose()?,
            )
            .bind(
                rule.usage_limit_per_user
                    .map(|limit| count_param(limit, "usage_limit_per_user"))
                    .transpose()?,
            )
            .bind(rule.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<DiscountCode, sqlx::Error> {
        query_as::<Postgres, DiscountCode>(DEACTIVATE_DISCOUNT_CODE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: DiscountCodeUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_USAGE_SQL)
            .bind(code.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Orders `user` has placed with `code`, whatever their status.
    pub(crate) async fn count_user_redemptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: DiscountCodeUuid,
        user: UserUuid,
    ) -> Result<u32, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_USER_REDEMPTIONS_SQL)
            .bind(code.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    pub(crate) async fn get_product_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<String, sqlx::Error> {
        query_scalar(GET_PRODUCT_NAME_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountCode {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let decode_error = |column: &str, error: bazaar::discounts::DefinitionError| {
            sqlx::Error::ColumnDecode {
                index: column.to_string(),
                source: Box::new(error),
            }
        };

        let kind: String = row.try_get("kind")?;
        let scope: String = row.try_get("scope")?;
        let product: Option<Uuid> = row.try_get("product_uuid")?;
        let product_name: Option<String> = row.try_get("product_name")?;

        let rule = DiscountRule {
            code: row.try_get("code")?,
            kind: kind
                .parse::<DiscountKind>()
                .map_err(|e| decode_error("kind", e))?,
            scope: DiscountScope::from_parts(&scope, product.zip(product_name))
                .map_err(|e| decode_error("scope", e))?,
            value: try_get_amount(row, "value")?,
            max_discount_amount: try_get_optional_amount(row, "max_discount_amount")?,
            min_order_amount: try_get_amount(row, "min_order_amount")?,
            starts_at: row
                .try_get::<Option<SqlxTimestamp>, _>("starts_at")?
                .map(SqlxTimestamp::to_jiff),
            ends_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ends_at")?
                .map(SqlxTimestamp::to_jiff),
            usage_limit_total: try_get_optional_count(row, "usage_limit_total")?,
            usage_limit_per_user: try_get_optional_count(row, "usage_limit_per_user")?,
            used_count: try_get_count(row, "used_count")?,
            is_active: row.try_get("is_active")?,
        };

        Ok(Self {
            uuid: DiscountCodeUuid::from_uuid(row.try_get("uuid")?),
            rule,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
