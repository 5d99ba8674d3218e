//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        content::{ContentService, PgContentService},
        discounts::{DiscountsService, PgDiscountsService},
        orders::{OrdersService, PgOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub accounts: Arc<dyn AccountsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub discounts: Arc<dyn DiscountsService>,
    pub orders: Arc<dyn OrdersService>,
    pub content: Arc<dyn ContentService>,
}

impl AppContext {
    /// Build every service over one pool.
    #[must_use]
    pub fn from_db(db: &Db, session_ttl: SignedDuration) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone())),
            accounts: Arc::new(PgAccountsService::new(db.clone(), session_ttl)),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            discounts: Arc::new(PgDiscountsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            content: Arc::new(PgContentService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        session_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), session_ttl))
    }
}
