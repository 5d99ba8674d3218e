//! Order Detail Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Order Detail Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let order = state
        .app
        .orders
        .get_order(identity.user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
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
            Router::with_path("accounts/orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_order_includes_items_and_label() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(move |_, _| Ok(make_order(uuid, OrderStatus::Shipped)));

        let body: OrderResponse =
            TestClient::get(format!("http://example.com/accounts/orders/{uuid}"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.status, "shipped");
        assert_eq!(body.status_label, OrderStatus::Shipped.label());
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].line_total, 200_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/accounts/orders/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
