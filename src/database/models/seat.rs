use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Theater seat ("poltrona"), unique per row/number pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    pub id: i32,
    pub fila: String,
    pub numero: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
