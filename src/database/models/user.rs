use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub rg: String,
    pub email: String,
    pub phone: Option<String>,
    pub number: Option<String>,
    pub username: String,
    // Stored as a sha2-256 hex digest; never serialized back to clients
    #[serde(skip_serializing)]
    pub password: String,
    pub profile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
