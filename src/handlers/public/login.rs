// POST /login - authenticate a user and issue a bearer token

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::config;
use crate::database::{db_pool, users};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

use super::register::required;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login_post(Json(req): Json<LoginRequest>) -> ApiResult<Value> {
    let username = required(&req.username, "username")?;
    let password = required(&req.password, "password")?;

    let pool = db_pool().await?;
    let user = users::find_by_username(&pool, username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !verify_password(password, &user.password) {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let expiry_hours = config::config().security.jwt_expiry_hours;
    let token = generate_jwt(Claims::new(user.id, user.username.clone())).map_err(|e| {
        tracing::error!("failed to generate token: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": user.id,
            "username": user.username,
            "profile": user.profile,
        },
        "expires_in": expiry_hours * 3600,
    })))
}
