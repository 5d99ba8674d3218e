//! Auth service.

use async_trait::async_trait;
use bazaar::carts::SessionCart;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::instrument;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionIdentity, SessionTokenVersion, SessionUuid,
        format_session_token, generate_session_secret, parse_session_token,
        repository::PgSessionsRepository,
    },
    database::Db,
    domain::accounts::models::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[instrument(skip_all)]
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<SessionIdentity, AuthServiceError> {
        let parsed_token =
            parse_session_token(bearer_token).map_err(|_parse_error| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(
                &mut tx,
                SessionUuid::from_uuid(parsed_token.session_uuid),
                Timestamp::now(),
            )
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if session.token_hash != parsed_token.secret.verifier() {
            return Err(AuthServiceError::NotFound);
        }

        Ok(SessionIdentity {
            session: session.uuid,
            user: session.user,
        })
    }
}

/// Open a session for `user` holding `cart`, returning the raw bearer token once.
pub(crate) async fn issue_session(
    repository: &PgSessionsRepository,
    tx: &mut Transaction<'_, Postgres>,
    user: UserUuid,
    cart: &SessionCart,
    expires_at: Timestamp,
) -> Result<IssuedSession, sqlx::Error> {
    let uuid = SessionUuid::new();
    let version = SessionTokenVersion::V1;
    let secret = generate_session_secret();
    let token = format_session_token(uuid.into_uuid(), version, &secret);

    let session = repository
        .create_session(tx, uuid, user, &secret.verifier(), cart, expires_at)
        .await?;

    Ok(IssuedSession { token, session })
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the live session it names.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<SessionIdentity, AuthServiceError>;
}
