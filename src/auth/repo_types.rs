use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub username: String,           // login name, unique
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 hash, not exposed in JSON
    pub full_name: String,          // display name
    pub created_at: OffsetDateTime, // creation timestamp
}

/// Fields needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
}
