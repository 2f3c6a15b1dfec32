use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Query string for the list/search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Absent counts as a mismatch.
    pub password_confirm: Option<String>,
}

/// Request body for name/email update.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: Option<String>,
}

/// Public part of the user returned in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_hex(),
            name: u.name,
            email: u.email,
        }
    }
}

/// The stored record as-is, credential included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<User> for UserRecord {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_hex(),
            name: u.name,
            email: u.email,
            password: u.password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub page_number: u64,
    pub page_size: u64,
    pub count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
