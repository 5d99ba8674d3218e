//! Remove Discount Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    discounts::errors::into_status_error, extensions::*, notices::NoticeResponse, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountRemovedResponse {
    pub notices: Vec<NoticeResponse>,
}

/// Remove Discount Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Discount Code",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<DiscountRemovedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let notice = state
        .app
        .discounts
        .remove_code(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountRemovedResponse {
        notices: vec![notice.into()],
    }))
}
