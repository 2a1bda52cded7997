use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ticket ("bilhete") binding a seat to a screening
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i32,
    pub id_poltrona: i32,
    pub id_sessao: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
