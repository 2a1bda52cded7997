// POST /user - register a new user account

use axum::Json;
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::user::User;
use crate::database::{db_pool, users};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile: Option<String>,
}

pub async fn user_post(Json(req): Json<RegisterRequest>) -> ApiResult<User> {
    let new = validate_registration(&req)?;

    let pool = db_pool().await?;
    if users::find_by_email(&pool, &new.email).await?.is_some() {
        return Err(ApiError::conflict("email already in use"));
    }
    if users::find_by_username(&pool, &new.username).await?.is_some() {
        return Err(ApiError::conflict("username already in use"));
    }

    let user = users::insert(&pool, &new).await?;
    Ok(ApiResponse::success(user))
}

/// Field presence and format checks for registration; first violation wins
pub(crate) fn validate_registration(req: &RegisterRequest) -> Result<users::NewUser, ApiError> {
    let name = required(&req.name, "name")?;
    let email = required(&req.email, "email")?;
    let cpf = required(&req.cpf, "cpf")?;
    let rg = required(&req.rg, "rg")?;
    let username = required(&req.username, "username")?;
    let password = required(&req.password, "password")?;

    if !is_valid_email(email) {
        return Err(ApiError::invalid_format("email", email));
    }
    if !is_valid_cpf(cpf) {
        return Err(ApiError::invalid_format("cpf", cpf));
    }
    if !is_valid_rg(rg) {
        return Err(ApiError::invalid_format("rg", rg));
    }
    if password.len() < 6 {
        return Err(ApiError::invalid_format("password", "too short"));
    }

    Ok(users::NewUser {
        name: name.to_string(),
        cpf: cpf.to_string(),
        rg: rg.to_string(),
        email: email.to_string(),
        phone: optional(&req.phone),
        number: optional(&req.number),
        username: username.to_string(),
        password_hash: hash_password(password),
        profile: optional(&req.profile),
    })
}

pub(crate) fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field(field))
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// CPF is exactly 11 digits
pub(crate) fn is_valid_cpf(cpf: &str) -> bool {
    cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit())
}

/// RG is 5 to 10 digits depending on the issuing state
pub(crate) fn is_valid_rg(rg: &str) -> bool {
    (5..=10).contains(&rg.len()) && rg.chars().all(|c| c.is_ascii_digit())
}
