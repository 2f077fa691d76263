use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::User;

/// Request body for user registration. Fields are optional so a missing one
/// is reported as a validation error instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: PublicUser,
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            full_name: u.full_name,
        }
    }
}
