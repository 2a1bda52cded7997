use sqlx::PgPool;

use crate::database::models::combo::Combo;
use crate::database::pool::DatabaseError;

#[derive(Debug, Clone)]
pub struct NewCombo {
    pub id_user: i32,
    pub value: String,
    pub tipo: String,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Combo>, DatabaseError> {
    let combo = sqlx::query_as::<_, Combo>(
        "SELECT id, id_user, value, tipo, created_at, updated_at FROM combo WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(combo)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Combo>, DatabaseError> {
    let combos = sqlx::query_as::<_, Combo>(
        "SELECT id, id_user, value, tipo, created_at, updated_at FROM combo ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(combos)
}

pub async fn insert(pool: &PgPool, new: &NewCombo) -> Result<Combo, DatabaseError> {
    sqlx::query_as::<_, Combo>(
        "INSERT INTO combo (id_user, value, tipo) VALUES ($1, $2, $3) \
         RETURNING id, id_user, value, tipo, created_at, updated_at",
    )
    .bind(new.id_user)
    .bind(&new.value)
    .bind(&new.tipo)
    .fetch_one(pool)
    .await
    .map_err(|err| {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23503") {
                return DatabaseError::NotFound("user does not exist".to_string());
            }
        }
        DatabaseError::Sqlx(err)
    })
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM combo WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
