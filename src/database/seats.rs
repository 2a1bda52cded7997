use sqlx::PgPool;

use crate::database::models::seat::Seat;
use crate::database::pool::{map_constraint_error, DatabaseError};

#[derive(Debug, Clone)]
pub struct NewSeat {
    pub fila: String,
    pub numero: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Seat>, DatabaseError> {
    let seat = sqlx::query_as::<_, Seat>(
        "SELECT id, fila, numero, created_at, updated_at FROM poltrona WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(seat)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Seat>, DatabaseError> {
    let seats = sqlx::query_as::<_, Seat>(
        "SELECT id, fila, numero, created_at, updated_at FROM poltrona ORDER BY fila, numero",
    )
    .fetch_all(pool)
    .await?;

    Ok(seats)
}

pub async fn insert(pool: &PgPool, new: &NewSeat) -> Result<Seat, DatabaseError> {
    sqlx::query_as::<_, Seat>(
        "INSERT INTO poltrona (fila, numero) VALUES ($1, $2) \
         RETURNING id, fila, numero, created_at, updated_at",
    )
    .bind(&new.fila)
    .bind(new.numero)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint_error(e, "poltrona already exists"))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM poltrona WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
