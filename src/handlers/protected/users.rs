// /user - user listing and maintenance (registration itself is public)

use axum::extract::Path;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::user::User;
use crate::database::{db_pool, users};
use crate::error::ApiError;
use crate::handlers::public::register::{is_valid_cpf, is_valid_email, is_valid_rg, required};
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub number: Option<String>,
}

/// GET /user
pub async fn user_list() -> ApiResult<Vec<User>> {
    let pool = db_pool().await?;
    Ok(ApiResponse::success(users::list(&pool).await?))
}

/// GET /user/:id
pub async fn user_get(Path(id): Path<i32>) -> ApiResult<User> {
    let pool = db_pool().await?;
    let user = users::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(ApiResponse::success(user))
}

/// PUT /user/:id - name, email, cpf and rg are required; credentials and
/// profile cannot be changed here
pub async fn user_put(
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    let update = validate_user_update(&req)?;

    let pool = db_pool().await?;
    if let Some(existing) = users::find_by_email(&pool, &update.email).await? {
        if existing.id != id {
            return Err(ApiError::conflict("email already in use"));
        }
    }

    let user = users::update(&pool, id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(ApiResponse::success(user))
}

/// DELETE /user/:id
pub async fn user_delete(Path(id): Path<i32>) -> ApiResult<Value> {
    let pool = db_pool().await?;
    if !users::delete(&pool, id).await? {
        return Err(ApiError::not_found("user not found"));
    }
    Ok(ApiResponse::success(json!({ "deleted": id })))
}

fn validate_user_update(req: &UpdateUserRequest) -> Result<users::UserUpdate, ApiError> {
    let name = required(&req.name, "name")?;
    let email = required(&req.email, "email")?;
    let cpf = required(&req.cpf, "cpf")?;
    let rg = required(&req.rg, "rg")?;

    if !is_valid_email(email) {
        return Err(ApiError::invalid_format("email", email));
    }
    if !is_valid_cpf(cpf) {
        return Err(ApiError::invalid_format("cpf", cpf));
    }
    if !is_valid_rg(rg) {
        return Err(ApiError::invalid_format("rg", rg));
    }

    Ok(users::UserUpdate {
        name: name.to_string(),
        cpf: cpf.to_string(),
        rg: rg.to_string(),
        email: email.to_string(),
        phone: req.phone.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from),
        number: req.number.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_requires_name_email_cpf_rg() {
        let req = UpdateUserRequest {
            name: Some("matheus".to_string()),
            cpf: Some("11430143916".to_string()),
            rg: Some("272582268".to_string()),
            email: None,
            phone: None,
            number: None,
        };
        assert!(validate_user_update(&req).is_err());

        let req = UpdateUserRequest {
            name: Some("matheus".to_string()),
            cpf: Some("11430143916".to_string()),
            rg: Some("272582268".to_string()),
            email: Some("matheus@gmail.com".to_string()),
            phone: None,
            number: None,
        };
        assert!(validate_user_update(&req).is_ok());
    }
}
