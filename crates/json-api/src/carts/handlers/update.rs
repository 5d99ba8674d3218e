//! Update Cart Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::carts::models::CartQuantity;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuantityRequest {
    pub product: Uuid,

    /// Zero or less removes the product
    pub quantity: i64,
}

/// Update Cart Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemsRequest {
    pub items: Vec<QuantityRequest>,
}

/// Update Cart Items Handler
///
/// Unknown products are ignored.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Quantities",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let quantities = json
        .into_inner()
        .items
        .into_iter()
        .map(|item| CartQuantity {
            product: item.product.into(),
            quantity: item.quantity,
        })
        .collect();

    let view = state
        .app
        .carts
        .update_items(identity, quantities)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bazaar_app::notices::Notice;

    use crate::{
        carts::handlers::tests::make_view,
        test_helpers::{Mocks, signed_in_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_update_forwards_every_quantity() -> TestResult {
        let kept = Uuid::now_v7();
        let dropped = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_items()
            .once()
            .withf(move |_, quantities| {
                quantities.len() == 2
                    && quantities[0].product.into_uuid() == kept
                    && quantities[0].quantity == 4
                    && quantities[1].quantity == 0
            })
            .return_once(move |_, _| {
                Ok(make_view(
                    kept,
                    4,
                    vec![Notice::success("سبد خرید به‌روزرسانی شد.")],
                ))
            });

        let response: CartResponse = TestClient::put("http://example.com/cart/items")
            .json(&json!({ "items": [
                { "product": kept, "quantity": 4 },
                { "product": dropped, "quantity": 0 },
            ] }))
            .send(&signed_in_service(
                mocks,
                Router::with_path("cart/items").put(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.lines.len(), 1, "expected the dropped line to be gone");
        assert_eq!(response.subtotal, 400_000);

        Ok(())
    }
}
