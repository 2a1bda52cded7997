use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scheduled showing of a movie in a room ("sessao").
/// `fim` is derived from `inicio + duracao` at validation time; the pair
/// backs the room/time exclusion constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Screening {
    pub id: i32,
    pub id_sala: i32,
    pub title_movie: String,
    pub description: String,
    pub data: NaiveDate,
    pub inicio: DateTime<Utc>,
    pub fim: DateTime<Utc>,
    pub duracao: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
