//! Depot helper extensions.

use std::any::Any;

use bazaar_app::auth::SessionIdentity;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: SessionIdentity);

    /// The caller resolved by the auth middleware.
    fn identity_or_401(&self) -> Result<SessionIdentity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: SessionIdentity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<SessionIdentity, StatusError> {
        self.obtain::<SessionIdentity>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
