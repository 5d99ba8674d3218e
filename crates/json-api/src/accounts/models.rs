//! Account response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::accounts::models::{Profile, User};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Profile and default delivery details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub username: String,

    /// Full name, or email while no name is set
    pub display_name: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,

    /// Whether checkout has everything it needs
    pub is_complete: bool,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            is_complete: profile.delivery_details().is_complete(),
            display_name: profile.display_name().to_string(),
            username: profile.username,
            email: profile.email,
            full_name: profile.full_name,
            phone: profile.phone,
            address: profile.address,
            postal_code: profile.postal_code,
            city: profile.city,
        }
    }
}
