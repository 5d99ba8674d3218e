//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bazaar_app::{domain::accounts::models::ProfileUpdate, notices::Notice};

use crate::{
    accounts::{errors::into_status_error, models::ProfileResponse},
    extensions::*,
    notices::NoticeResponse,
    state::State,
};

const PROFILE_SAVED: &str = "اطلاعات با موفقیت ذخیره شد.";

/// Update Profile Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProfileRequest {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            full_name: request.full_name,
            phone: request.phone,
            address: request.address,
            postal_code: request.postal_code,
            city: request.city,
        }
    }
}

/// Profile Saved Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileSavedResponse {
    pub profile: ProfileResponse,
    pub notices: Vec<NoticeResponse>,
}

/// Update Profile Handler
///
/// Replaces the delivery details; fields are trimmed before saving.
#[endpoint(
    tags("accounts"),
    summary = "Update Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileSavedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let profile = state
        .app
        .accounts
        .update_profile(identity.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProfileSavedResponse {
        profile: profile.into(),
        notices: vec![Notice::success(PROFILE_SAVED).into()],
    }))
}
