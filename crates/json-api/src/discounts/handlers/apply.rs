//! Apply Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::notices::Notice;

use crate::{
    discounts::errors::into_status_error, extensions::*, notices::NoticeResponse, state::State,
};

/// Apply Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyDiscountRequest {
    /// Case-insensitive; surrounding whitespace is ignored
    pub code: String,
}

/// Applied Discount Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedDiscountResponse {
    /// Normalized code
    pub code: String,

    /// Discount on the current cart, in toman
    pub amount: u64,

    /// Discounted product, for product-scoped codes
    pub product_name: Option<String>,
    pub notices: Vec<NoticeResponse>,
}

/// Apply Discount Handler
#[endpoint(
    tags("cart"),
    summary = "Apply Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Code applied"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Code rejected or cart empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<AppliedDiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let applied = state
        .app
        .discounts
        .apply_code(identity, &json.into_inner().code)
        .await
        .map_err(into_status_error)?;

    let notice = Notice::success(applied.message());

    Ok(Json(AppliedDiscountResponse {
        code: applied.code,
        amount: applied.amount,
        product_name: applied.product_name,
        notices: vec![notice.into()],
    }))
}
