//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    notices::{NoticeResponse, into_responses},
    observability::{StorefrontEvent, record_event},
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The new pending order
    pub order: OrderResponse,

    /// Order confirmation, plus a warning when the applied code was dropped
    pub notices: Vec<NoticeResponse>,
}

/// Checkout Handler
///
/// Turns the cart into a pending order. A code that stopped validating is dropped with a notice.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty cart or incomplete profile"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let outcome = state
        .app
        .orders
        .checkout(identity)
        .await
        .map_err(into_status_error)?;

    record_event(StorefrontEvent::OrderPlaced);

    res.add_header(LOCATION, format!("/accounts/orders/{}", outcome.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        order: outcome.order.into(),
        notices: into_responses(outcome.notices),
    }))
}
