//! Accounts service.

use async_trait::async_trait;
use bazaar::carts::SessionCart;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    auth::{
        IssuedSession, PgSessionsRepository, SessionIdentity, issue_session,
        passwords::{hash_password, verify_password},
    },
    database::Db,
    domain::{
        accounts::{
            errors::AccountsServiceError,
            models::{MIN_PASSWORD_CHARS, Profile, ProfileUpdate, Registration, User, UserUuid},
            repository::PgAccountsRepository,
        },
        carts::repositories::PgCartItemsRepository,
    },
};

/// Default lifetime of a login session: two weeks.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 14);

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
    sessions: PgSessionsRepository,
    cart_items: PgCartItemsRepository,
    session_ttl: SignedDuration,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
            sessions: PgSessionsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            session_ttl,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        })
}

#[async_trait]
impl AccountsService for PgAccountsService {
    #[instrument(skip_all)]
    async fn register(&self, registration: Registration) -> Result<User, AccountsServiceError> {
        let email = registration.email.trim().to_lowercase();

        if !is_plausible_email(&email) {
            return Err(AccountsServiceError::InvalidEmail);
        }

        if registration.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AccountsServiceError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }

        if registration.password != registration.password_confirmation {
            return Err(AccountsServiceError::PasswordMismatch);
        }

        let password_hash = hash_password(&registration.password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &email, &email, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "user registered");

        Ok(user)
    }

    #[instrument(skip_all)]
    async fn login(
        &self,
        identifier: &str,
        password: &str,
        guest_cart: SessionCart,
    ) -> Result<IssuedSession, AccountsServiceError> {
        let identifier = identifier.trim();

        let mut tx = self.db.begin().await?;

        let credentials = if identifier.contains('@') {
            self.repository
                .find_credentials_by_email(&mut tx, &identifier.to_lowercase())
                .await?
        } else {
            self.repository
                .find_credentials_by_username(&mut tx, identifier)
                .await?
        };

        let Some(credentials) = credentials else {
            // Unknown accounts cost the same hashing work as a wrong password.
            let _unused = hash_password(password);

            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !verify_password(password, &credentials.password_hash) {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        let mut cart = guest_cart;

        self.cart_items
            .merge_into(&mut tx, credentials.uuid, &mut cart)
            .await?;

        self.cart_items
            .replace_items(&mut tx, credentials.uuid, &cart)
            .await?;

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(|_overflow| AccountsServiceError::InvalidData)?;

        let issued = issue_session(&self.sessions, &mut tx, credentials.uuid, &cart, expires_at)
            .await?;

        tx.commit().await?;

        info!(user = %credentials.uuid, session = %issued.session.uuid, "user logged in");

        Ok(issued)
    }

    #[instrument(skip(self), fields(session = %identity.session))]
    async fn logout(&self, identity: SessionIdentity) -> Result<(), AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self
            .sessions
            .lock_session(&mut tx, identity.session)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => AccountsServiceError::SessionNotFound,
                other => AccountsServiceError::from(other),
            })?;

        self.cart_items
            .replace_items(&mut tx, session.user, &session.cart)
            .await?;

        self.sessions.revoke_session(&mut tx, session.uuid).await?;

        tx.commit().await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, user: UserUuid) -> Result<Profile, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_profile(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self
            .repository
            .update_profile(&mut tx, user, &update.trimmed())
            .await?;

        tx.commit().await?;

        Ok(profile)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create an account whose username is its email.
    async fn register(&self, registration: Registration) -> Result<User, AccountsServiceError>;

    /// Verify credentials and open a session.
    ///
    /// `identifier` is an email when it contains `@`, a username otherwise. The account's saved
    /// cart is merged into `guest_cart`, keeping the larger quantity per product.
    async fn login(
        &self,
        identifier: &str,
        password: &str,
        guest_cart: SessionCart,
    ) -> Result<IssuedSession, AccountsServiceError>;

    /// Save the session cart to the account and end the session.
    async fn logout(&self, identity: SessionIdentity) -> Result<(), AccountsServiceError>;

    async fn get_profile(&self, user: UserUuid) -> Result<Profile, AccountsServiceError>;

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthService,
        domain::carts::CartsService,
        test::{
            TestContext,
            helpers::{TEST_PASSWORD, create_category, create_product, register_user},
        },
    };

    use super::*;

    fn registration(email: &str, password: &str, confirmation: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[tokio::test]
    async fn register_lowercases_email_and_uses_it_as_username() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .accounts
            .register(registration(" Sara@Example.COM ", TEST_PASSWORD, TEST_PASSWORD))
            .await?;

        assert_eq!(user.email, "sara@example.com");
        assert_eq!(user.username, "sara@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        register_user(&ctx, "dup@example.com").await?;

        let result = ctx
            .accounts
            .register(registration("DUP@example.com", TEST_PASSWORD, TEST_PASSWORD))
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn weak_registrations_are_rejected() {
        let ctx = TestContext::new().await;

        let short = ctx
            .accounts
            .register(registration("a@example.com", "short", "short"))
            .await;

        let mismatch = ctx
            .accounts
            .register(registration("a@example.com", TEST_PASSWORD, "different-pass"))
            .await;

        let bad_email = ctx
            .accounts
            .register(registration("not-an-email", TEST_PASSWORD, TEST_PASSWORD))
            .await;

        assert!(
            matches!(short, Err(AccountsServiceError::PasswordTooShort { min: 8 })),
            "expected PasswordTooShort, got {short:?}"
        );
        assert!(
            matches!(mismatch, Err(AccountsServiceError::PasswordMismatch)),
            "expected PasswordMismatch, got {mismatch:?}"
        );
        assert!(
            matches!(bad_email, Err(AccountsServiceError::InvalidEmail)),
            "expected InvalidEmail, got {bad_email:?}"
        );
    }

    #[tokio::test]
    async fn login_by_email_ignores_case() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "reza@example.com").await?;

        let by_email = ctx
            .accounts
            .login("REZA@example.com", TEST_PASSWORD, SessionCart::new())
            .await?;

        let identity = ctx.auth.authenticate_bearer(&by_email.token).await?;

        assert_eq!(identity.user, user);

        let again = ctx
            .accounts
            .login("reza@example.com", TEST_PASSWORD, SessionCart::new())
            .await?;

        assert_ne!(again.session.uuid, by_email.session.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_alike() -> TestResult {
        let ctx = TestContext::new().await;
        register_user(&ctx, "ali@example.com").await?;

        let wrong = ctx
            .accounts
            .login("ali@example.com", "wrong-password", SessionCart::new())
            .await;

        let unknown = ctx
            .accounts
            .login("nobody", TEST_PASSWORD, SessionCart::new())
            .await;

        assert!(
            matches!(wrong, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong:?}"
        );
        assert!(
            matches!(unknown, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {unknown:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_merges_saved_cart_by_max_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        register_user(&ctx, "merge@example.com").await?;

        let category = create_category(&ctx, "shirts").await?;
        let shirt = create_product(&ctx, category.uuid, "shirt", 50_000, 10).await?;
        let scarf = create_product(&ctx, category.uuid, "scarf", 20_000, 10).await?;

        let first = ctx
            .accounts
            .login("merge@example.com", TEST_PASSWORD, SessionCart::new())
            .await?;

        let identity = first.session.identity();

        ctx.carts.add_item(identity, shirt.uuid, Some(3)).await?;
        ctx.accounts.logout(identity).await?;

        let guest: SessionCart = [(shirt.uuid.into_uuid(), 1), (scarf.uuid.into_uuid(), 2)]
            .into_iter()
            .collect();

        let second = ctx
            .accounts
            .login("merge@example.com", TEST_PASSWORD, guest)
            .await?;

        assert_eq!(second.session.cart.quantity(shirt.uuid.into_uuid()), 3);
        assert_eq!(second.session.cart.quantity(scarf.uuid.into_uuid()), 2);

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_session() -> TestResult {
        let ctx = TestContext::new().await;
        register_user(&ctx, "bye@example.com").await?;

        let issued = ctx
            .accounts
            .login("bye@example.com", TEST_PASSWORD, SessionCart::new())
            .await?;

        ctx.accounts.logout(issued.session.identity()).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(result.is_err(), "revoked session should not authenticate");

        Ok(())
    }

    #[tokio::test]
    async fn profile_update_trims_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "trim@example.com").await?;

        let profile = ctx
            .accounts
            .update_profile(
                user,
                ProfileUpdate {
                    full_name: "  Sara Ahmadi ".to_string(),
                    phone: " 0912 ".to_string(),
                    address: "Tehran ".to_string(),
                    postal_code: String::new(),
                    city: " Tehran".to_string(),
                },
            )
            .await?;

        assert_eq!(profile.full_name, "Sara Ahmadi");
        assert_eq!(profile.phone, "0912");
        assert!(profile.delivery_details().is_complete());

        let fetched = ctx.accounts.get_profile(user).await?;

        assert_eq!(fetched.city, "Tehran");

        Ok(())
    }
}
