//! About Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    content::{errors::into_status_error, models::AboutResponse},
    extensions::*,
    state::State,
};

/// About Handler
///
/// Page settings, falling back to defaults, with active brands, team and testimonials.
#[endpoint(tags("content"), summary = "About Page")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AboutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let view = state
        .app
        .content
        .about()
        .await
        .map_err(into_status_error)?;

    Ok(Json(view.into()))
}
