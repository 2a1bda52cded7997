use sqlx::PgPool;

use crate::database::models::user::User;
use crate::database::pool::{map_constraint_error, DatabaseError};

const USER_COLUMNS: &str = "id, name, cpf, rg, email, phone, number, username, password, profile, \
     created_at, updated_at";

/// Validated registration data ready for persistence
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub cpf: String,
    pub rg: String,
    pub email: String,
    pub phone: Option<String>,
    pub number: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub profile: Option<String>,
}

/// Mutable user fields; everything else is fixed after registration
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub cpf: String,
    pub rg: String,
    pub email: String,
    pub phone: Option<String>,
    pub number: Option<String>,
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuario WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuario WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuario WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, DatabaseError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuario ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn insert(pool: &PgPool, new: &NewUser) -> Result<User, DatabaseError> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO usuario (name, cpf, rg, email, phone, number, username, password, profile) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&new.name)
    .bind(&new.cpf)
    .bind(&new.rg)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.number)
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.profile)
    .fetch_one(pool)
    .await
    .map_err(|e| map_constraint_error(e, "email or username already in use"))
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    update: &UserUpdate,
) -> Result<Option<User>, DatabaseError> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE usuario \
         SET name = $2, cpf = $3, rg = $4, email = $5, phone = $6, number = $7, updated_at = now() \
         WHERE id = $1 \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(&update.name)
    .bind(&update.cpf)
    .bind(&update.rg)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(&update.number)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_constraint_error(e, "email already in use"))
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, DatabaseError> {
    let result = sqlx::query("DELETE FROM usuario WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
