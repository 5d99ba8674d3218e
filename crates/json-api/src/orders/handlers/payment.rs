//! Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::{domain::orders::OrdersServiceError, notices::Notice};

use crate::{
    extensions::*,
    notices::NoticeResponse,
    observability::{StorefrontEvent, record_event},
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

const PAYMENT_CONFIRMED: &str = "پرداخت با موفقیت انجام شد. فاکتور شما آماده است.";

/// Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    pub order: OrderResponse,
    pub notices: Vec<NoticeResponse>,
}

/// Payment Handler
///
/// Sells every item from stock and marks the order paid, or changes nothing.
#[endpoint(
    tags("orders"),
    summary = "Confirm Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order paid"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order not payable or stock ran out"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = match state
        .app
        .orders
        .confirm_payment(identity.user, order.into_inner().into())
        .await
    {
        Ok(order) => order,
        Err(error @ OrdersServiceError::InsufficientStock { .. }) => {
            record_event(StorefrontEvent::PaymentFailed);

            return Err(into_status_error(error));
        }
        Err(error) => return Err(into_status_error(error)),
    };

    record_event(StorefrontEvent::PaymentConfirmed);

    Ok(Json(PaymentResponse {
        order: order.into(),
        notices: vec![Notice::success(PAYMENT_CONFIRMED).into()],
    }))
}
