//! Session models.

use bazaar::carts::SessionCart;
use jiff::Timestamp;

use crate::{domain::accounts::models::UserUuid, uuids::TypedUuid};

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    pub session: SessionUuid,
    pub user: UserUuid,
}

/// A signed-in session and the cart state it carries.
#[derive(Debug, Clone)]
pub struct Session {
    pub uuid: SessionUuid,
    pub user: UserUuid,
    pub cart: SessionCart,
    pub discount_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Session {
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            session: self.uuid,
            user: self.user,
        }
    }
}

/// Verifier data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub uuid: SessionUuid,
    pub user: UserUuid,
    pub token_hash: String,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: Session,
}
