//! Cancel Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::notices::Notice;

use crate::{
    extensions::*,
    notices::NoticeResponse,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

const ORDER_CANCELLED: &str = "سفارش با موفقیت لغو شد.";

/// Cancel Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelResponse {
    pub order: OrderResponse,
    pub notices: Vec<NoticeResponse>,
}

/// Cancel Order Handler
///
/// Allowed while the order is pending, paid or processing.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already shipped"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CancelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .cancel_order(identity.user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CancelResponse {
        order: order.into(),
        notices: vec![Notice::success(ORDER_CANCELLED).into()],
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bazaar::orders::OrderStatus;
    use bazaar_app::domain::orders::{OrdersServiceError, models::OrderUuid};

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{Mocks, signed_in_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        signed_in_service(
            mocks,
            Router::with_path("accounts/orders/{order}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_pending_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_cancel_order()
            .once()
            .withf(move |_, order| *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, OrderStatus::Cancelled)));

        let body: CancelResponse =
            TestClient::post(format!("http://example.com/accounts/orders/{uuid}/cancel"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(body.order.status, "cancelled");
        assert_eq!(body.notices[0].message, ORDER_CANCELLED);

        Ok(())
    }

    #[tokio::test]
    async fn test_shipped_order_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotCancellable));

        let res = TestClient::post(format!(
            "http://example.com/accounts/orders/{}/cancel",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
