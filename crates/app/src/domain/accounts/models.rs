//! Account Models

use bazaar::orders::DeliveryDetails;
use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored credentials looked up at login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
}

/// Registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Profile Model
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: UserUuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Delivery snapshot copied onto orders.
    #[must_use]
    pub fn delivery_details(&self) -> DeliveryDetails {
        DeliveryDetails {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            city: self.city.clone(),
        }
    }

    /// Name shown in greetings: full name, falling back to email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

/// Profile Update Model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl ProfileUpdate {
    /// Copy with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }
}
