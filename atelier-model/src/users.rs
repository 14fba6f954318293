use crate::ids::UserId;
use crate::status::{UserRole, UserStatus};
use chrono::{DateTime, Utc};

/// Platform account as listed on the accounts page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The signed-in staff member, returned by the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
}
