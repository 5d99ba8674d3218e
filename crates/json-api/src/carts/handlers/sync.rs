//! Sync Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Sync Cart Handler
///
/// Saves the session cart to the account so it survives logout.
#[endpoint(
    tags("cart"),
    summary = "Save Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart saved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .carts
        .sync_cart(identity)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
