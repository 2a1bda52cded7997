use sqlx::PgPool;

use crate::database::models::ticket::Ticket;
use crate::database::pool::DatabaseError;

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub id_poltrona: i32,
    pub id_sessao: i32,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Ticket>, DatabaseError> {
    let ticket = sqlx::query_as::<_, Ticket>(
        "SELECT id, id_poltrona, id_sessao, created_at, updated_at FROM bilhete WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(ticket)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Ticket>, DatabaseError> {
    let tickets = sqlx::query_as::<_, Ticket>(
        "SELECT id, id_poltrona, id_sessao, created_at, updated_at FROM bilhete ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(tickets)
}

pub async fn insert(pool: &PgPool, new: &NewTicket) -> Result<Ticket, DatabaseError> {
    sqlx::query_as::<_, Ticket>(
        "INSERT INTO bilhete (id_poltrona, id_sessao) VALUES ($1, $2) \
         RETURNING id, id_poltrona, id_sessao, created_at, updated_at",
    )
    .bind(new.id_poltrona)
    .bind(new.id_sessao)
    .fetch_one(pool)
    .await
    .map_err(map_fk_error)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM bilhete WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// A ticket referencing a missing seat or screening trips the FK constraints;
/// report that as a not-found on the referenced record.
fn map_fk_error(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(ref db_err) = err {
        // 23503 foreign_key_violation
        if db_err.code().as_deref() == Some("23503") {
            return DatabaseError::NotFound("poltrona or sessao does not exist".to_string());
        }
    }
    DatabaseError::Sqlx(err)
}
