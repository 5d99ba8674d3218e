//! Sessions repository.

use bazaar::carts::SessionCart;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::{
    auth::models::{ActiveSession, Session, SessionUuid},
    domain::accounts::models::UserUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const LOCK_SESSION_SQL: &str = include_str!("sql/lock_session.sql");
const SAVE_SESSION_STATE_SQL: &str = include_str!("sql/save_session_state.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        user: UserUuid,
        token_hash: &str,
        cart: &SessionCart,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Postgres, Session>(CREATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(user.into_uuid())
            .bind(token_hash)
            .bind(Json(cart))
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        now: Timestamp,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Load the session row and hold its lock until the transaction ends, serializing cart
    /// mutations made through the same session.
    pub(crate) async fn lock_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Postgres, Session>(LOCK_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn save_session_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        cart: &SessionCart,
        discount_code: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SAVE_SESSION_STATE_SQL)
            .bind(session.into_uuid())
            .bind(Json(cart))
            .bind(discount_code)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Session {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart: row.try_get::<Json<SessionCart>, _>("cart")?.0,
            discount_code: row.try_get("discount_code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            token_hash: row.try_get("token_hash")?,
        })
    }
}
