use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Concession combo attached to a user order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Combo {
    pub id: i32,
    pub id_user: i32,
    pub value: String,
    pub tipo: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Accepted values for the `tipo` column
pub const COMBO_TYPES: &[&str] = &["none", "popcorn", "drink", "popcorn + drink"];
